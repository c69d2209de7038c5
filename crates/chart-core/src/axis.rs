// File: crates/chart-core/src/axis.rs
// Summary: Axis model with labels, ranges and tick placement.

use crate::grid::{format_tick, nice_step, nice_ticks};

/// Approximate number of tick intervals per axis.
pub const DEFAULT_TICK_TARGET: usize = 8;

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self {
        Self::new("X", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("Y", 0.0, 1.0)
    }

    /// Position of `v` as a fraction of the range (0 at `min`, 1 at `max`).
    /// Works in half-units so ranges near `f64::MAX` do not overflow.
    pub fn fraction(&self, v: f64) -> f64 {
        let half = (self.max * 0.5 - self.min * 0.5).max(5e-10);
        (v * 0.5 - self.min * 0.5) / half
    }

    /// Tick positions and their formatted labels.
    pub fn ticks(&self, target: usize) -> Vec<(f64, String)> {
        let step = nice_step(self.min, self.max, target);
        nice_ticks(self.min, self.max, target)
            .into_iter()
            .map(|v| (v, format_tick(v, step)))
            .collect()
    }
}
