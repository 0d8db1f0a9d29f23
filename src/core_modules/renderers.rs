// THEORY:
// The `renderers` module is the mode registry: a closed enum of render modes
// and one drawing function per mode. The registry is an exhaustive `match`
// over the closed `Mode` enum rather than a string-keyed closure table, so
// coverage is checked at compile time and the unknown-key branch only exists
// at the parsing boundary (`Mode::from_key`).
//
// Key architectural principles:
// 1.  **Renderers are pure consumers**: every mode reads the same per-tick
//     `{lum, motion}` pair (plus the persistent quadrant state where needed)
//     and emits paint calls. Switching modes never forces upstream grids to
//     be recomputed.
// 2.  **Style is configuration**: thresholds, hue/sat mapping, layer
//     opacities, bin/wedge/ring counts all come from `PipelineConfig`. The
//     few literals that remain below are fixed visual geometry, not tuning.

use crate::config::PipelineConfig;
use crate::core_modules::canvas::{
    BLACK, BlendMode, Canvas, Color, Fill, GradientStop, INK, INK_SOFT, Paint,
};
use crate::core_modules::features::{
    self, gradients, luminance_histogram, motion_stats, radial_sectors,
};
use crate::core_modules::regions::RegionalMotion;
use serde::{Deserialize, Serialize};

/// Soft threshold subtracted from edge strength before the sparkle test.
const EDGE_BIAS: f32 = 4.0;
/// Sparkle visibility floor for biased edge strength / raw motion.
const SPARKLE_MIN_EDGE: f32 = 1.0;
const SPARKLE_MIN_MOTION: f32 = 2.0;
/// Saturation ceiling for the blended middle gradient stop.
const MID_STOP_SAT_CAP: f32 = 90.0;

/// One render mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Per-column luminance means as vertical bars.
    #[serde(rename = "brightness")]
    Brightness,
    /// Short strokes along the negative luminance gradient, per moving cell.
    #[serde(rename = "motion")]
    MotionField,
    /// Dots where edge strength and/or motion exceed a soft threshold.
    #[serde(rename = "edge-sparkles")]
    EdgeSparkles,
    /// Concentric circles around the motion centroid.
    #[serde(rename = "motion-rings")]
    MotionRings,
    /// Luminance histogram as bars, normalized to the fullest bin.
    #[serde(rename = "histogram-bars")]
    HistogramBars,
    /// Radial falloff centered on the motion centroid.
    #[serde(rename = "centroid-spotlight")]
    CentroidSpotlight,
    /// Pie wedges from center, one per angular sector.
    #[serde(rename = "radial-rays")]
    RadialRays,
    /// Quadrant gradient background with per-cell circles on top.
    #[serde(rename = "motion-circles")]
    MotionCircles,
    /// Quadrant gradient background with the motion field on top. Default.
    #[serde(rename = "gradient-motion")]
    #[default]
    GradientMotion,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Brightness,
        Mode::MotionField,
        Mode::EdgeSparkles,
        Mode::MotionRings,
        Mode::HistogramBars,
        Mode::CentroidSpotlight,
        Mode::RadialRays,
        Mode::MotionCircles,
        Mode::GradientMotion,
    ];

    /// The string identifier used by hosts (key bindings, config files).
    pub fn key(self) -> &'static str {
        match self {
            Mode::Brightness => "brightness",
            Mode::MotionField => "motion",
            Mode::EdgeSparkles => "edge-sparkles",
            Mode::MotionRings => "motion-rings",
            Mode::HistogramBars => "histogram-bars",
            Mode::CentroidSpotlight => "centroid-spotlight",
            Mode::RadialRays => "radial-rays",
            Mode::MotionCircles => "motion-circles",
            Mode::GradientMotion => "gradient-motion",
        }
    }

    pub fn from_key(key: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Parsing boundary for untrusted identifiers: unknown keys fall back to
    /// the default composite mode.
    pub fn from_key_or_default(key: &str) -> Mode {
        Mode::from_key(key).unwrap_or_default()
    }
}

/// The per-tick grid pair every renderer consumes.
pub struct FrameView<'a> {
    pub lum: &'a [f32],
    pub motion: &'a [f32],
    pub cols: usize,
    pub rows: usize,
}

/// Clears the canvas and renders one frame in the given mode.
pub fn render(
    mode: Mode,
    view: &FrameView,
    regions: &RegionalMotion,
    config: &PipelineConfig,
    canvas: &mut dyn Canvas,
) {
    canvas.clear();
    match mode {
        Mode::Brightness => draw_brightness_bars(view, canvas),
        Mode::MotionField => draw_motion_field(view, config, canvas),
        Mode::EdgeSparkles => draw_edge_sparkles(view, canvas),
        Mode::MotionRings => draw_motion_rings(view, config, canvas),
        Mode::HistogramBars => draw_histogram_bars(view, config, canvas),
        Mode::CentroidSpotlight => draw_centroid_spotlight(view, canvas),
        Mode::RadialRays => draw_radial_rays(view, config, canvas),
        Mode::MotionCircles => {
            draw_motion_gradient(regions, config, canvas);
            draw_motion_circles(view, config, canvas);
        }
        Mode::GradientMotion => {
            draw_motion_gradient(regions, config, canvas);
            draw_motion_field(view, config, canvas);
        }
    }
}

fn hsl(h: f32, s: f32, l: f32) -> Color {
    Color::Hsl { h, s, l }
}

fn stop(offset: f32, color: Color) -> GradientStop {
    GradientStop {
        offset,
        color,
        alpha: 1.0,
    }
}

/// Two blended linear gradients whose stop colors derive from the smoothed
/// quadrant motion: a horizontal pass, then a vertical pass with a screen
/// (lightening) blend on top.
fn draw_motion_gradient(regions: &RegionalMotion, config: &PipelineConfig, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let (cx, cy) = (w / 2.0, h / 2.0);

    let (left, right) = (regions.left(), regions.right());
    let (top, bottom) = (regions.top(), regions.bottom());

    let (hue_l, sat_l) = (config.motion_hue(left), config.motion_sat(left));
    let (hue_r, sat_r) = (config.motion_hue(right), config.motion_sat(right));
    let (hue_t, sat_t) = (config.motion_hue(top), config.motion_sat(top));
    let (hue_b, sat_b) = (config.motion_hue(bottom), config.motion_sat(bottom));

    let horizontal = Fill::LinearGradient {
        from: (0.0, cy),
        to: (w, cy),
        stops: vec![
            stop(0.0, hsl(hue_l, sat_l, config.lightness_top)),
            stop(
                0.5,
                hsl(
                    (hue_l + hue_r) / 2.0,
                    ((sat_l + sat_r) / 2.0).min(MID_STOP_SAT_CAP),
                    config.lightness_mid,
                ),
            ),
            stop(1.0, hsl(hue_r, sat_r, config.lightness_bottom)),
        ],
    };
    canvas.fill_rect(
        0.0,
        0.0,
        w,
        h,
        Paint {
            fill: horizontal,
            alpha: 1.0,
            blend: BlendMode::SourceOver,
        }
        .with_alpha(config.gradient_alpha_h),
    );

    let vertical = Fill::LinearGradient {
        from: (cx, 0.0),
        to: (cx, h),
        stops: vec![
            stop(0.0, hsl(hue_t, sat_t, config.lightness_top)),
            stop(
                0.5,
                hsl(
                    (hue_t + hue_b) / 2.0,
                    ((sat_t + sat_b) / 2.0).min(MID_STOP_SAT_CAP),
                    config.lightness_mid,
                ),
            ),
            stop(1.0, hsl(hue_b, sat_b, config.lightness_bottom)),
        ],
    };
    canvas.fill_rect(
        0.0,
        0.0,
        w,
        h,
        Paint {
            fill: vertical,
            alpha: 1.0,
            blend: BlendMode::Screen,
        }
        .with_alpha(config.gradient_alpha_v),
    );
}

/// Short line segments per interior cell above the motion threshold, oriented
/// along the negative luminance gradient, length scaled by motion magnitude.
fn draw_motion_field(view: &FrameView, config: &PipelineConfig, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let cell_w = w / view.cols as f32;
    let cell_h = h / view.rows as f32;
    let cell = cell_w.min(cell_h);
    let line_width = cell * 0.08;
    let g = gradients(view.lum, view.cols, view.rows);

    for y in 1..view.rows.saturating_sub(1) {
        for x in 1..view.cols.saturating_sub(1) {
            let i = y * view.cols + x;
            let m = view.motion[i];
            if m < config.motion_threshold {
                continue;
            }

            // Point the stroke downhill in brightness.
            let dx = -g.gx[i];
            let dy = -g.gy[i];
            let len = dx.hypot(dy);
            let len = if len > 0.0 { len } else { 1.0 };
            let (nx, ny) = (dx / len, dy / len);

            let scale = cell * (m / 40.0).min(1.5);
            let cx = x as f32 * cell_w + cell_w / 2.0;
            let cy = y as f32 * cell_h + cell_h / 2.0;

            canvas.stroke_line(
                cx - nx * scale * 0.5,
                cy - ny * scale * 0.5,
                cx + nx * scale * 0.5,
                cy + ny * scale * 0.5,
                line_width,
                Paint::solid(INK).with_alpha(0.85),
            );
        }
    }
}

/// Per-column luminance means as vertical bars.
fn draw_brightness_bars(view: &FrameView, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let averages = features::column_brightness(view.lum, view.cols, view.rows);
    let bar_w = w / view.cols as f32;

    for (x, avg) in averages.iter().enumerate() {
        let bar_h = (avg / 255.0) * h;
        canvas.fill_rect(
            x as f32 * bar_w,
            h - bar_h,
            bar_w * 0.9,
            bar_h,
            Paint::solid(INK_SOFT),
        );
    }
}

/// Filled dots per interior cell where biased edge strength or motion clears
/// the visibility floor; radius and opacity grow with the combined magnitude.
fn draw_edge_sparkles(view: &FrameView, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let cell_w = w / view.cols as f32;
    let cell_h = h / view.rows as f32;
    let g = gradients(view.lum, view.cols, view.rows);

    for y in 1..view.rows.saturating_sub(1) {
        for x in 1..view.cols.saturating_sub(1) {
            let i = y * view.cols + x;
            let edge = g.gx[i].hypot(g.gy[i]);
            let m = view.motion[i];
            let e = (edge - EDGE_BIAS).max(0.0);
            if e < SPARKLE_MIN_EDGE && m < SPARKLE_MIN_MOTION {
                continue;
            }

            let cx = x as f32 * cell_w + cell_w / 2.0;
            let cy = y as f32 * cell_h + cell_h / 2.0;
            let radius = cell_w.min(cell_h) * ((e + m) / 60.0).min(0.6);
            let alpha = (0.2 + (e + m) / 40.0).min(1.0);

            canvas.fill_circle(cx, cy, radius, Paint::solid(INK).with_alpha(alpha));
        }
    }
}

/// Concentric circles centered on the motion centroid; stroke width scales
/// with global energy, opacity falls off outward.
fn draw_motion_rings(view: &FrameView, config: &PipelineConfig, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let stats = motion_stats(view.motion, view.cols, view.rows);
    let px = stats.cx * w;
    let py = stats.cy * h;

    let max_radius = w.hypot(h) * 0.7;
    let rings = config.ring_count;
    for k in 1..=rings {
        let radius = (k as f32 / rings as f32) * max_radius;
        let width = ((stats.energy / 8.0) * (1.0 + k as f32 * 0.2)).max(1.0);
        let alpha = 0.08 + 0.06 * (rings - k) as f32;
        canvas.stroke_circle(px, py, radius, width, Paint::solid(INK).with_alpha(alpha));
    }
}

/// One bar per histogram bin, height normalized to the fullest bin.
fn draw_histogram_bars(view: &FrameView, config: &PipelineConfig, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let hist = luminance_histogram(view.lum, config.histogram_bins);
    if hist.is_empty() {
        return;
    }
    let max = hist.iter().copied().max().unwrap_or(0).max(1);
    let bar_w = w / hist.len() as f32;

    for (i, count) in hist.iter().enumerate() {
        let bar_h = (*count as f32 / max as f32) * h;
        canvas.fill_rect(
            i as f32 * bar_w,
            h - bar_h,
            bar_w * 0.9,
            bar_h,
            Paint::solid(INK_SOFT),
        );
    }
}

/// A radial gradient centered on the motion centroid, radius growing with
/// global energy, opacity fading from center to rim.
fn draw_centroid_spotlight(view: &FrameView, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let stats = motion_stats(view.motion, view.cols, view.rows);
    let px = stats.cx * w;
    let py = stats.cy * h;
    let radius = w.max(h) * (0.25 + (stats.energy / 15.0).min(0.4));

    let fill = Fill::RadialGradient {
        center: (px, py),
        inner_radius: radius * 0.1,
        outer_radius: radius,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: INK,
                alpha: 0.9,
            },
            GradientStop {
                offset: 0.7,
                color: INK,
                alpha: 0.3,
            },
            GradientStop {
                offset: 1.0,
                color: INK,
                alpha: 0.0,
            },
        ],
    };
    canvas.fill_rect(
        0.0,
        0.0,
        w,
        h,
        Paint {
            fill,
            alpha: 1.0,
            blend: BlendMode::SourceOver,
        },
    );
}

/// Pie-slice wedges from the canvas center, radius scaled by each sector's
/// mean motion.
fn draw_radial_rays(view: &FrameView, config: &PipelineConfig, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let (cx, cy) = (w / 2.0, h / 2.0);
    let rays = radial_sectors(view.motion, view.cols, view.rows, config.radial_wedges);
    let max_radius = cx.min(cy) * 0.95;
    let tau = std::f32::consts::TAU;

    for (k, m) in rays.iter().enumerate() {
        let a0 = k as f32 / rays.len() as f32 * tau;
        let a1 = (k + 1) as f32 / rays.len() as f32 * tau;
        let radius = max_radius * (0.3 + m / 20.0).min(1.0);

        let points = vec![
            (cx, cy),
            (cx + a0.cos() * radius, cy + a0.sin() * radius),
            (cx + a1.cos() * radius, cy + a1.sin() * radius),
        ];
        canvas.fill_polygon(points, Paint::solid(INK).with_alpha(0.65));
    }
}

/// Filled circles per cell above the motion threshold, radius mapped from
/// motion magnitude and capped at a multiple of the cell size.
fn draw_motion_circles(view: &FrameView, config: &PipelineConfig, canvas: &mut dyn Canvas) {
    let (w, h) = canvas.size();
    let cell_w = w / view.cols as f32;
    let cell_h = h / view.rows as f32;
    let base = cell_w.min(cell_h);
    let max_radius = base * config.circle_max_overlap;

    for y in 0..view.rows {
        for x in 0..view.cols {
            let m = view.motion[y * view.cols + x];
            if m < config.motion_threshold {
                continue;
            }

            let cx = x as f32 * cell_w + cell_w / 2.0;
            let cy = y as f32 * cell_h + cell_h / 2.0;
            let radius = ((m / config.circle_sensitivity) * max_radius).min(max_radius);

            canvas.fill_circle(
                cx,
                cy,
                radius,
                Paint::solid(BLACK).with_alpha(config.circle_alpha),
            );
        }
    }
}
