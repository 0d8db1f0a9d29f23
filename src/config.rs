// THEORY:
// The `config` module gathers every tunable constant of the pipeline into a
// single `PipelineConfig` struct. The two deployments of this system (a
// file-backed "video response" wall and a camera-backed "web cam" mirror) run
// the same pipeline with very different constants (one calm, one reactive),
// so both constant sets live here as named presets rather than as a single
// blessed tuning.
//
// Key architectural principles:
// 1.  **No magic in the core**: sampling resolution, smoothing factors, motion
//     thresholds, and the hue/saturation mapping are all configuration. The
//     analysis and renderer modules read them; they never hardcode them.
// 2.  **Derived geometry**: only the column count is configured. The row count
//     is always derived as `round(cols * 9/16)` so the sampling grid keeps a
//     16:9 shape regardless of resolution.
// 3.  **Host-friendly**: the struct is serde-derived so an embedding host can
//     supply a JSON tuning file and fall back to a preset for missing fields.

use serde::{Deserialize, Serialize};

/// Every tunable of the pipeline, from sampling resolution to render styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width of the sampling grid in cells. Rows are derived (16:9).
    pub cols: u32,
    /// Motion smoothing factor `α` in `[0,1)`. Higher = calmer field.
    pub smoothing: f32,
    /// Regional (quadrant) smoothing factor `β` in `[0,1)`.
    pub region_smoothing: f32,
    /// Per-cell motion below this is ignored by the field/circle renderers.
    pub motion_threshold: f32,
    /// Motion-to-hue slope, in degrees per unit of motion.
    pub hue_gain: f32,
    /// Upper bound on the mapped hue, in degrees.
    pub hue_cap: f32,
    /// Saturation floor in percent.
    pub base_saturation: f32,
    /// Motion-to-saturation slope.
    pub saturation_gain: f32,
    /// Upper bound on the mapped saturation, in percent.
    pub saturation_cap: f32,
    /// Lightness of the first gradient stop, in percent.
    pub lightness_top: f32,
    /// Lightness of the middle gradient stop, in percent.
    pub lightness_mid: f32,
    /// Lightness of the last gradient stop, in percent.
    pub lightness_bottom: f32,
    /// Opacity of the horizontal gradient pass. Clamped to 1.0 at paint time.
    pub gradient_alpha_h: f32,
    /// Opacity of the vertical (screen-blended) gradient pass.
    pub gradient_alpha_v: f32,
    /// Bin count for the luminance histogram.
    pub histogram_bins: usize,
    /// Wedge count for the radial sector aggregation.
    pub radial_wedges: usize,
    /// Ring count for the motion-rings renderer.
    pub ring_count: usize,
    /// Max circle radius as a multiple of the cell size (circles mode).
    pub circle_max_overlap: f32,
    /// Fill opacity of the motion circles.
    pub circle_alpha: f32,
    /// Motion-to-radius divisor for the circles mode. Lower = bigger circles.
    pub circle_sensitivity: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::video_preset()
    }
}

impl PipelineConfig {
    /// Tuning of the file-backed "video response" deployment: a coarse grid
    /// with heavy regional smoothing and a restrained hue range.
    pub fn video_preset() -> Self {
        Self {
            cols: 24,
            smoothing: 0.85,
            region_smoothing: 0.9,
            motion_threshold: 2.0,
            hue_gain: 2.5,
            hue_cap: 220.0,
            base_saturation: 35.0,
            saturation_gain: 0.6,
            saturation_cap: 80.0,
            lightness_top: 55.0,
            lightness_mid: 50.0,
            lightness_bottom: 45.0,
            gradient_alpha_h: 0.9,
            gradient_alpha_v: 0.9,
            histogram_bins: 32,
            radial_wedges: 24,
            ring_count: 8,
            circle_max_overlap: 0.8,
            circle_alpha: 0.7,
            circle_sensitivity: 20.0,
        }
    }

    /// Tuning of the camera-backed "web cam" deployment: a finer grid, a much
    /// more reactive regional blend, and a full hue sweep.
    pub fn webcam_preset() -> Self {
        Self {
            cols: 48,
            region_smoothing: 0.1,
            motion_threshold: 10.0,
            hue_gain: 6.0,
            hue_cap: 360.0,
            saturation_gain: 1.6,
            gradient_alpha_h: 1.2,
            gradient_alpha_v: 1.2,
            ..Self::video_preset()
        }
    }

    /// Row count of the sampling grid, derived from the column count so the
    /// grid keeps a 16:9 shape. Never below 1.
    pub fn rows(&self) -> u32 {
        ((self.cols as f32 * 9.0 / 16.0).round() as u32).max(1)
    }

    /// Total number of cells in the sampling grid.
    pub fn cell_count(&self) -> usize {
        (self.cols.max(1) * self.rows()) as usize
    }

    /// Maps a motion magnitude to a hue in degrees.
    pub fn motion_hue(&self, m: f32) -> f32 {
        (m * self.hue_gain).min(self.hue_cap)
    }

    /// Maps a motion magnitude to a saturation percentage.
    pub fn motion_sat(&self, m: f32) -> f32 {
        (self.base_saturation + m * self.saturation_gain).min(self.saturation_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_derived_and_never_zero() {
        let mut config = PipelineConfig::video_preset();
        assert_eq!(config.rows(), 14); // 24 * 9/16 = 13.5, rounds up

        config.cols = 4;
        assert_eq!(config.rows(), 2); // 2.25 rounds down

        config.cols = 1;
        assert_eq!(config.rows(), 1); // 0.5625 rounds to 1

        config.cols = 48;
        assert_eq!(config.rows(), 27);
    }

    #[test]
    fn hue_and_sat_respect_caps() {
        let config = PipelineConfig::video_preset();
        assert_eq!(config.motion_hue(0.0), 0.0);
        assert_eq!(config.motion_hue(10.0), 25.0);
        assert_eq!(config.motion_hue(1000.0), 220.0);
        assert_eq!(config.motion_sat(0.0), 35.0);
        assert_eq!(config.motion_sat(1000.0), 80.0);
    }

    #[test]
    fn presets_deserialize_with_partial_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "cols": 32, "motion_threshold": 5.0 }"#).unwrap();
        assert_eq!(config.cols, 32);
        assert_eq!(config.motion_threshold, 5.0);
        // Unspecified fields come from the default (video) preset.
        assert_eq!(config.histogram_bins, 32);
    }
}
