// THEORY:
// The `features` module holds the stateless derivers: pure functions that
// compute secondary signals from the per-tick luminance and motion grids.
// Each render mode consumes one or two of these; none of them carries state
// across ticks (the one stateful aggregate, quadrant motion, lives in
// `regions`).
//
// Key architectural principles:
// 1.  **Pure and grid-shaped**: every function takes grids plus dimensions and
//     returns fresh data. They can be called in any order, or not at all,
//     without affecting the pipeline.
// 2.  **Degenerate input degrades quietly**: empty wedges report zero, a
//     motionless frame yields a centered centroid. No function here can fail.

/// Central-difference spatial gradients, computed on interior cells only.
/// The one-cell border stays zero to avoid out-of-range neighbor reads.
pub struct Gradients {
    pub gx: Vec<f32>,
    pub gy: Vec<f32>,
}

pub fn gradients(lum: &[f32], cols: usize, rows: usize) -> Gradients {
    let mut gx = vec![0.0; cols * rows];
    let mut gy = vec![0.0; cols * rows];
    for y in 1..rows.saturating_sub(1) {
        for x in 1..cols.saturating_sub(1) {
            let i = y * cols + x;
            gx[i] = lum[i + 1] - lum[i - 1];
            gy[i] = lum[i + cols] - lum[i - cols];
        }
    }
    Gradients { gx, gy }
}

/// Global motion energy and the motion-weighted centroid, both normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStats {
    /// Total motion divided by the cell count.
    pub energy: f32,
    /// Centroid x in `[0,1]`; 0.5 when the frame is motionless.
    pub cx: f32,
    /// Centroid y in `[0,1]`; 0.5 when the frame is motionless.
    pub cy: f32,
}

pub fn motion_stats(motion: &[f32], cols: usize, rows: usize) -> MotionStats {
    let mut sum = 0.0f32;
    let mut sx = 0.0f32;
    let mut sy = 0.0f32;
    for y in 0..rows {
        for x in 0..cols {
            let m = motion[y * cols + x];
            sum += m;
            sx += x as f32 * m;
            sy += y as f32 * m;
        }
    }
    let energy = sum / (cols * rows) as f32;
    if sum > 0.0 {
        MotionStats {
            energy,
            cx: (sx / sum) / cols.saturating_sub(1).max(1) as f32,
            cy: (sy / sum) / rows.saturating_sub(1).max(1) as f32,
        }
    } else {
        MotionStats {
            energy,
            cx: 0.5,
            cy: 0.5,
        }
    }
}

/// Mean motion per angular wedge, measured around the grid center. Wedges
/// with no member cells report zero.
pub fn radial_sectors(motion: &[f32], cols: usize, rows: usize, wedges: usize) -> Vec<f32> {
    if wedges == 0 {
        return Vec::new();
    }
    let center_x = (cols as f32 - 1.0) / 2.0;
    let center_y = (rows as f32 - 1.0) / 2.0;
    let tau = std::f32::consts::TAU;

    let mut acc = vec![0.0f32; wedges];
    let mut count = vec![0u32; wedges];
    for y in 0..rows {
        for x in 0..cols {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let angle = dy.atan2(dx).rem_euclid(tau);
            let k = ((wedges as f32 * angle / tau) as usize).min(wedges - 1);
            acc[k] += motion[y * cols + x];
            count[k] += 1;
        }
    }
    for k in 0..wedges {
        if count[k] > 0 {
            acc[k] /= count[k] as f32;
        }
    }
    acc
}

/// Mean luminance of each column, across all rows.
pub fn column_brightness(lum: &[f32], cols: usize, rows: usize) -> Vec<f32> {
    (0..cols)
        .map(|x| {
            let sum: f32 = (0..rows).map(|y| lum[y * cols + x]).sum();
            sum / rows.max(1) as f32
        })
        .collect()
}

/// Luminance histogram over `bins` buckets, top bin clamped.
pub fn luminance_histogram(lum: &[f32], bins: usize) -> Vec<u32> {
    if bins == 0 {
        return Vec::new();
    }
    let scale = bins as f32 / 256.0;
    let mut hist = vec![0u32; bins];
    for l in lum {
        let bin = ((l * scale) as usize).min(bins - 1);
        hist[bin] += 1;
    }
    hist
}
