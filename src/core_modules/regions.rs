// THEORY:
// The `RegionalMotion` aggregator is the only stateful feature deriver. It
// tracks a smoothed mean motion for each quadrant of the grid and blends a
// new per-tick mean into that state with factor `β`. The quadrant gradient
// renderer reads the four values (and their side averages) to color its
// gradient stops, so this state is what gives the background its slow,
// direction-aware color drift.
//
// Key architectural principles:
// 1.  **Convex blend**: `state = β·state + (1-β)·mean` keeps each quadrant
//     value between its previous value and the new mean.
// 2.  **Empty quadrants hold**: a quadrant with zero member cells (possible
//     after a pathological resize) leaves its state untouched that tick.
// 3.  **Explicit reset**: stopping the stream zeroes all four values.

/// Smoothed mean motion per grid quadrant, persisted across ticks.
#[derive(Debug, Clone)]
pub struct RegionalMotion {
    /// Regional smoothing factor `β` in `[0,1)`. Higher = calmer.
    beta: f32,
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl RegionalMotion {
    pub fn new(beta: f32) -> Self {
        Self {
            beta,
            top_left: 0.0,
            top_right: 0.0,
            bottom_left: 0.0,
            bottom_right: 0.0,
        }
    }

    /// Blends this tick's per-quadrant mean motion into the smoothed state.
    /// The top half is `y < floor(rows/2)`, the right half `x >= floor(cols/2)`.
    pub fn advance(&mut self, motion: &[f32], cols: usize, rows: usize) {
        let mid_row = rows / 2;
        let mid_col = cols / 2;

        let mut sums = [0.0f32; 4];
        let mut counts = [0u32; 4];
        for y in 0..rows {
            let top = y < mid_row;
            for x in 0..cols {
                let right = x >= mid_col;
                let quadrant = match (top, right) {
                    (true, false) => 0,
                    (true, true) => 1,
                    (false, false) => 2,
                    (false, true) => 3,
                };
                sums[quadrant] += motion[y * cols + x];
                counts[quadrant] += 1;
            }
        }

        let a = self.beta;
        let b = 1.0 - a;
        let slots = [
            &mut self.top_left,
            &mut self.top_right,
            &mut self.bottom_left,
            &mut self.bottom_right,
        ];
        for ((slot, sum), count) in slots.into_iter().zip(sums).zip(counts) {
            if count > 0 {
                *slot = a * *slot + b * (sum / count as f32);
            }
        }
    }

    /// Side averages consumed by the gradient renderer.
    pub fn left(&self) -> f32 {
        (self.top_left + self.bottom_left) / 2.0
    }

    pub fn right(&self) -> f32 {
        (self.top_right + self.bottom_right) / 2.0
    }

    pub fn top(&self) -> f32 {
        (self.top_left + self.top_right) / 2.0
    }

    pub fn bottom(&self) -> f32 {
        (self.bottom_left + self.bottom_right) / 2.0
    }

    /// Zeroes all quadrant state (stream stop).
    pub fn reset(&mut self) {
        self.top_left = 0.0;
        self.top_right = 0.0;
        self.bottom_left = 0.0;
        self.bottom_right = 0.0;
    }
}
