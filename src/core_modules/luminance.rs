// THEORY:
// The `luminance` module collapses the sampled RGB grid into the single
// brightness channel that the rest of the pipeline runs on. The weights are
// the perceptual luma coefficients (ITU-R BT.601); they must not drift,
// because every downstream threshold in the render modes was tuned against
// exactly this scale.

use image::RgbaImage;

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Perceptual luma of a single RGB triple, in `[0,255]`.
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Converts a sampled grid image into a row-major luminance grid.
pub fn luminance_grid(sample: &RgbaImage) -> Vec<f32> {
    sample
        .pixels()
        .map(|p| luma(p.0[0], p.0[1], p.0[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_is_bounded() {
        assert_eq!(luma(0, 0, 0), 0.0);
        assert!((luma(255, 255, 255) - 255.0).abs() < 1e-3);
        for (r, g, b) in [(255, 0, 0), (0, 255, 0), (0, 0, 255), (12, 200, 99)] {
            let l = luma(r, g, b);
            assert!((0.0..=255.0).contains(&l), "luma out of range: {l}");
        }
    }

    #[test]
    fn weights_match_perceptual_luma() {
        assert!((luma(255, 0, 0) - 76.245).abs() < 1e-3);
        assert!((luma(0, 255, 0) - 149.685).abs() < 1e-3);
        assert!((luma(0, 0, 255) - 29.07).abs() < 1e-3);
    }

    #[test]
    fn grid_is_row_major() {
        let mut sample = RgbaImage::new(2, 2);
        sample.put_pixel(1, 0, image::Rgba([255, 255, 255, 255]));
        let lum = luminance_grid(&sample);
        assert_eq!(lum.len(), 4);
        assert_eq!(lum[0], 0.0);
        assert!((lum[1] - 255.0).abs() < 1e-3); // x=1, y=0 lands at index 1
        assert_eq!(lum[2], 0.0);
    }
}
