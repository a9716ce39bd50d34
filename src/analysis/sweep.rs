use super::simulation::{simulate, SimulationOutcome, SimulationParams};
use super::ResultSequence;
use rayon::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    pub auto_cashout: f64,
    pub outcome: SimulationOutcome,
}

/// Upper bound on the number of simulations a single sweep may run.
const MAX_SWEEP_POINTS: usize = 10_000;

fn generate_cashouts(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || min > max {
        return Vec::new();
    }

    let steps = ((max - min) / step + 1e-9).floor();
    if !steps.is_finite() || steps >= MAX_SWEEP_POINTS as f64 {
        warn!(
            min,
            max,
            step,
            limit = MAX_SWEEP_POINTS,
            "cashout grid too large, sweep skipped"
        );
        return Vec::new();
    }

    (0..=steps as usize)
        .map(|k| ((min + k as f64 * step) * 1e6).round() / 1e6)
        .collect()
}

/// Runs the strategy once per cashout multiplier in `[min, max]`, best final balance first.
pub fn sweep_cashouts(
    numbers: &ResultSequence,
    base: &SimulationParams,
    min: f64,
    max: f64,
    step: f64,
) -> Vec<SweepResult> {
    let cashouts = generate_cashouts(min, max, step);
    if cashouts.is_empty() {
        warn!(min, max, step, "empty cashout range, sweep skipped");
        return Vec::new();
    }

    info!("Sweeping {} cashout multipliers", cashouts.len());

    let mut results: Vec<SweepResult> = cashouts
        .par_iter()
        .map(|&auto_cashout| {
            let params = SimulationParams {
                auto_cashout,
                ..*base
            };
            SweepResult {
                auto_cashout,
                outcome: simulate(numbers, &params),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.outcome
            .final_balance
            .partial_cmp(&a.outcome.final_balance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
