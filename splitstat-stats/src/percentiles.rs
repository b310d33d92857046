//! Percentile Computation
//!
//! Empirical percentiles with linear interpolation between nearest ranks.
//! Used for bootstrap confidence intervals.

/// Compute a single empirical percentile from samples.
///
/// Uses linear interpolation between nearest ranks. The percentile is
/// interpreted on the [0, 100] domain; out-of-range requests clamp to the
/// nearest bound (0 yields the minimum, 100 the maximum). Returns 0.0 for
/// an empty input.
pub fn empirical_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_of_sorted(&sorted, percentile)
}

/// Percentile of an already-sorted slice (avoids re-sorting per percentile).
pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let n = sorted.len();
    // NaN requests degrade to the lower bound; clamp alone would pass NaN on
    let p = if percentile.is_nan() {
        0.0
    } else {
        (percentile / 100.0).clamp(0.0, 1.0)
    };

    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}
