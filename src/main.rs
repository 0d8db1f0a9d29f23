// Example runner for the `motion_canvas` library: synthesizes a short clip
// (a bright square orbiting a dark frame), runs the full pipeline over it at
// 60 fps, cycles through every render mode, and prints what each tick
// painted. Pass a JSON file to override the default webcam tuning:
//
//   motion_canvas [config.json]

use std::time::Duration;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use motion_canvas::{
    FrameLoop, FrameSequence, Mode, Pipeline, PipelineConfig, RecordingCanvas,
};

const CLIP_FRAMES: u32 = 240;
const FRAME_WIDTH: u32 = 320;
const FRAME_HEIGHT: u32 = 180;

fn synthetic_clip() -> Vec<RgbaImage> {
    (0..CLIP_FRAMES)
        .map(|t| {
            let angle = t as f32 / CLIP_FRAMES as f32 * std::f32::consts::TAU;
            let cx = FRAME_WIDTH as f32 / 2.0 + angle.cos() * 90.0;
            let cy = FRAME_HEIGHT as f32 / 2.0 + angle.sin() * 50.0;
            RgbaImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, y| {
                let inside = (x as f32 - cx).abs() < 20.0 && (y as f32 - cy).abs() < 20.0;
                if inside {
                    Rgba([230, 230, 230, 255])
                } else {
                    Rgba([25, 25, 25, 255])
                }
            })
        })
        .collect()
}

fn load_config() -> Result<PipelineConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(PipelineConfig::webcam_preset()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    println!(
        "motion_canvas demo: {}x{} grid, {} modes",
        config.cols,
        config.rows(),
        Mode::ALL.len()
    );

    let pipeline = Pipeline::new(config, FrameSequence::new(synthetic_clip()));
    let canvas = RecordingCanvas::new(960.0, 540.0);
    let (frame_loop, control) = FrameLoop::new(pipeline, canvas, Duration::from_millis(16));

    // Cycle through every render mode while the clip plays.
    let cycler = tokio::spawn(async move {
        for mode in Mode::ALL.into_iter().cycle() {
            control.set_mode(mode);
            tokio::time::sleep(Duration::from_millis(400)).await;
        }
    });

    let (pipeline, mut canvas) = frame_loop.run().await;
    cycler.abort();

    println!(
        "processed {} frames; final mode {}; {} paint ops recorded",
        pipeline.frames_processed(),
        pipeline.current_mode().key(),
        canvas.take_ops().len()
    );
    Ok(())
}
