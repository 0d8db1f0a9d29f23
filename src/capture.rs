// THEORY:
// The `capture` module defines the pipeline's view of a video source. A
// file-backed clip and a live camera differ only behind this trait; the
// pipeline itself never initiates capture, never asks for permissions, never
// controls playback. It only polls for the current decoded frame.
//
// Readiness and loss are both expressed through `frame_dimensions`: `None`
// means the source is gone (the driver stops), a zero dimension means it is
// not ready yet (the driver skips the tick).

use image::RgbaImage;

/// A video source the pipeline can poll once per tick.
pub trait CaptureSource {
    /// Dimensions of the current frame. `None` signals source loss.
    fn frame_dimensions(&self) -> Option<(u32, u32)>;

    /// The current decoded frame. Polling may advance internal playback.
    fn frame(&mut self) -> Option<&RgbaImage>;
}

/// An in-memory sequence of decoded frames, played back one per poll.
/// Backs file-based playback in the demo runner and deterministic tests.
pub struct FrameSequence {
    frames: Vec<RgbaImage>,
    cursor: usize,
    looping: bool,
}

impl FrameSequence {
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames,
            cursor: 0,
            looping: false,
        }
    }

    /// Restarts from the first frame when the sequence runs out, like a
    /// looping video element.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    fn current_index(&self) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        if self.looping {
            Some(self.cursor % self.frames.len())
        } else if self.cursor < self.frames.len() {
            Some(self.cursor)
        } else {
            None
        }
    }
}

impl CaptureSource for FrameSequence {
    fn frame_dimensions(&self) -> Option<(u32, u32)> {
        self.current_index()
            .map(|i| self.frames[i].dimensions())
    }

    fn frame(&mut self) -> Option<&RgbaImage> {
        let index = self.current_index()?;
        self.cursor += 1;
        Some(&self.frames[index])
    }
}
