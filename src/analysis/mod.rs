pub mod pattern;
pub mod simulation;
pub mod streak;
pub mod sweep;

use ndarray::Array1;

/// Ordered outcome multipliers, one per round, in the order they were recorded.
pub type ResultSequence = Array1<f64>;

/// Dividing value between low outcomes (below) and high outcomes (at or above).
pub const LOW_THRESHOLD: f64 = 2.0;

/// Low streaks strictly longer than this are counted.
pub const STREAK_CUTOFF: usize = 7;

#[inline]
pub fn is_low(value: f64) -> bool {
    value < LOW_THRESHOLD
}

pub use pattern::count_wins;
pub use simulation::{SimulationOutcome, SimulationParams};
pub use streak::count_long_streaks;
pub use sweep::{sweep_cashouts, SweepResult};
