// THEORY:
// The `MotionEstimator` is the temporal heart of the pipeline. It turns a
// stream of per-tick luminance grids into a smoothed per-cell motion field by
// exponentially blending each new absolute frame difference into the previous
// field: `m = α·m_prev + (1-α)·|ΔL|`.
//
// Key architectural principles:
// 1.  **Sole owner of history**: the previous luminance and motion grids live
//     here and nowhere else. They are stored as copies, so later in-place work
//     on the current grids can never corrupt the history.
// 2.  **No spurious startup spike**: the very first tick has nothing to diff
//     against and yields an all-zero field. The first real difference is
//     passed through raw (no prior field to blend with); smoothing begins on
//     the tick after that.
// 3.  **Resize means restart**: if the grid size changes between ticks the old
//     history is meaningless, so it is discarded and the estimator behaves as
//     on a first tick.

/// Exponentially smoothed absolute frame-difference field.
pub struct MotionEstimator {
    /// Smoothing factor `α` in `[0,1)`. Higher = calmer.
    alpha: f32,
    prev_luminance: Option<Vec<f32>>,
    prev_motion: Option<Vec<f32>>,
}

impl MotionEstimator {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            prev_luminance: None,
            prev_motion: None,
        }
    }

    /// Computes the motion field for the current tick and replaces the stored
    /// history with copies of this tick's grids.
    pub fn advance(&mut self, luminance: &[f32]) -> Vec<f32> {
        let prev_lum = match &self.prev_luminance {
            Some(prev) if prev.len() == luminance.len() => prev,
            _ => {
                // First tick, or the grid was resized: no valid history.
                self.prev_luminance = Some(luminance.to_vec());
                self.prev_motion = None;
                return vec![0.0; luminance.len()];
            }
        };

        let prev_motion = match &self.prev_motion {
            Some(prev) if prev.len() == luminance.len() => Some(prev.as_slice()),
            _ => None,
        };

        let a = self.alpha;
        let motion: Vec<f32> = luminance
            .iter()
            .zip(prev_lum.iter())
            .enumerate()
            .map(|(i, (lum, prev))| {
                let diff = (lum - prev).abs();
                match prev_motion {
                    Some(m) => a * m[i] + (1.0 - a) * diff,
                    None => diff,
                }
            })
            .collect();

        self.prev_luminance = Some(luminance.to_vec());
        self.prev_motion = Some(motion.clone());
        motion
    }

    /// Drops all history. The next `advance` behaves like a first tick.
    pub fn reset(&mut self) {
        self.prev_luminance = None;
        self.prev_motion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_all_zero() {
        let mut est = MotionEstimator::new(0.85);
        let motion = est.advance(&[10.0, 200.0, 55.0, 0.0]);
        assert_eq!(motion, vec![0.0; 4]);
    }

    #[test]
    fn recurrence_matches_reference_scenario() {
        // 2x2 grid, α = 0.5. Tick 0 is zero; tick 1 has no motion history so
        // the raw diff of 100 passes through; tick 2 diffs back down by 100
        // and blends 0.5·100 + 0.5·100 = 100.
        let mut est = MotionEstimator::new(0.5);
        assert_eq!(est.advance(&[0.0, 0.0, 0.0, 0.0]), vec![0.0; 4]);

        let tick1 = est.advance(&[100.0, 0.0, 0.0, 0.0]);
        assert_eq!(tick1, vec![100.0, 0.0, 0.0, 0.0]);

        let tick2 = est.advance(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(tick2, vec![100.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn static_input_decays_geometrically() {
        let mut est = MotionEstimator::new(0.85);
        est.advance(&[0.0, 0.0]);
        let mut previous = est.advance(&[40.0, 40.0])[0];
        assert_eq!(previous, 40.0);

        // Identical frames from here on: each tick multiplies by α exactly.
        for _ in 0..10 {
            let current = est.advance(&[40.0, 40.0])[0];
            assert!((current - 0.85 * previous).abs() < 1e-4);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn motion_is_never_negative() {
        let mut est = MotionEstimator::new(0.3);
        let frames = [
            vec![0.0, 255.0, 128.0],
            vec![255.0, 0.0, 128.0],
            vec![10.0, 10.0, 10.0],
        ];
        for frame in &frames {
            assert!(est.advance(frame).iter().all(|m| *m >= 0.0));
        }
    }

    #[test]
    fn resize_discards_history() {
        let mut est = MotionEstimator::new(0.5);
        est.advance(&[0.0, 0.0, 0.0, 0.0]);
        est.advance(&[50.0, 50.0, 50.0, 50.0]);

        // Different cell count: behaves like a fresh start.
        let motion = est.advance(&[0.0, 0.0]);
        assert_eq!(motion, vec![0.0; 2]);
        // And the first diff afterwards is raw again.
        assert_eq!(est.advance(&[30.0, 0.0]), vec![30.0, 0.0]);
    }

    #[test]
    fn reset_behaves_like_stream_restart() {
        let mut est = MotionEstimator::new(0.5);
        est.advance(&[0.0]);
        est.advance(&[100.0]);
        est.reset();
        assert_eq!(est.advance(&[200.0]), vec![0.0]);
    }
}
