//! Bootstrap Resampling
//!
//! Draws resamples (with replacement, original sizes) from treatment and
//! control, computes the delta of means per resampled pair, and reports
//! empirical percentiles of the resulting delta distribution.
//!
//! Resamples are independent, so the loop is parallelized with Rayon; only
//! the aggregated distribution matters, never completion order.

use crate::delta::{PercentileValue, mean};
use crate::percentiles::percentile_of_sorted;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

/// Empirical confidence interval of the delta via bootstrap resampling.
///
/// `seed` pins every resample to a deterministic RNG stream; `None` uses the
/// thread RNG.
pub(crate) fn bootstrap_interval(
    treatment: &[f64],
    control: &[f64],
    percentiles: &[f64],
    n_samples: usize,
    seed: Option<u64>,
) -> Vec<PercentileValue> {
    debug!(n_samples, seeded = seed.is_some(), "bootstrapping delta distribution");

    let mut deltas: Vec<f64> = match seed {
        Some(seed) => (0..n_samples)
            .into_par_iter()
            .map(|i| {
                // One RNG per resample keeps the output independent of how
                // Rayon splits the range.
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                resample_delta(&mut rng, treatment, control)
            })
            .collect(),
        None => (0..n_samples)
            .into_par_iter()
            .map_init(thread_rng, |rng, _| resample_delta(rng, treatment, control))
            .collect(),
    };

    deltas.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    percentiles
        .iter()
        .map(|&p| PercentileValue {
            percentile: p,
            value: percentile_of_sorted(&deltas, p),
        })
        .collect()
}

/// Delta of means for one resampled treatment/control pair
fn resample_delta<R: Rng>(rng: &mut R, treatment: &[f64], control: &[f64]) -> f64 {
    resample_mean(rng, treatment) - resample_mean(rng, control)
}

fn resample_mean<R: Rng>(rng: &mut R, samples: &[f64]) -> f64 {
    if samples.len() == 1 {
        return samples[0];
    }
    let sum: f64 = (0..samples.len())
        .map(|_| samples[rng.gen_range(0..samples.len())])
        .sum();
    sum / samples.len() as f64
}
