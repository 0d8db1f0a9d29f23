// THEORY:
// The `sampler` module is the first stage of the pipeline: it reduces an
// arbitrary-resolution video frame to the small cols×rows analysis grid.
// Everything downstream (luminance, motion, every renderer) operates on this
// grid, so the sampler is the only place that ever touches full-resolution
// pixel data.
//
// Key architectural principles:
// 1.  **Cover semantics**: the source frame is center-cropped to the grid's
//     aspect ratio before scaling, so the grid always sees an undistorted
//     window into the middle of the frame, never a squashed one.
// 2.  **Skip, don't guess**: a zero-sized source frame means the stream is not
//     ready yet. The sampler returns `None` and the driver skips the whole
//     tick, mutating nothing.

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Center-crops `frame` to the grid's aspect ratio and scales it down into a
/// `cols`×`rows` sample. Returns `None` when the frame or the grid has a zero
/// dimension.
pub fn sample_frame(frame: &RgbaImage, cols: u32, rows: u32) -> Option<RgbaImage> {
    let (vw, vh) = frame.dimensions();
    if vw == 0 || vh == 0 || cols == 0 || rows == 0 {
        return None;
    }

    let source_aspect = vw as f64 / vh as f64;
    let grid_aspect = cols as f64 / rows as f64;

    // Wider source: crop width down to match, centered horizontally.
    // Taller source: crop height down, centered vertically.
    let (sx, sy, sw, sh) = if source_aspect > grid_aspect {
        let sh = vh as f64;
        let sw = sh * grid_aspect;
        ((vw as f64 - sw) / 2.0, 0.0, sw, sh)
    } else {
        let sw = vw as f64;
        let sh = sw / grid_aspect;
        (0.0, (vh as f64 - sh) / 2.0, sw, sh)
    };

    let crop = imageops::crop_imm(
        frame,
        sx as u32,
        sy as u32,
        (sw.round() as u32).max(1),
        (sh.round() as u32).max(1),
    )
    .to_image();

    Some(imageops::resize(&crop, cols, rows, FilterType::Triangle))
}
