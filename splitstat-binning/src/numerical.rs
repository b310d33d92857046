//! Numerical Binning
//!
//! Fits quantile-based boundary thresholds over a reference sample. Bin `i`
//! covers `[boundary[i], boundary[i+1])`; the final bin is closed on both
//! ends so the observed maximum stays inside the partition. Anything outside
//! the observed range, and any missing value, labels as the catch-all bin.

use crate::{BinIndex, BinningError, DEFAULT_NUM_BINS};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// An immutable partition of a numeric domain into ordered bins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericalBinning {
    // Strictly increasing; a single entry encodes the degenerate
    // constant-reference partition whose only bin is the zero-width
    // closed interval at that value.
    boundaries: Vec<f64>,
}

/// Fit a numerical binning over a reference sample.
///
/// Boundaries are placed at evenly spaced quantiles of the reference, so
/// denser regions get more boundaries and skewed data does not produce
/// near-empty bins. Duplicate quantiles collapse, which caps the bin count
/// at the number of distinct reference values. `n_bins` defaults to
/// [`DEFAULT_NUM_BINS`](crate::DEFAULT_NUM_BINS).
pub fn fit_numerical(
    reference: &[f64],
    n_bins: Option<usize>,
) -> Result<NumericalBinning, BinningError> {
    let k = n_bins.unwrap_or(DEFAULT_NUM_BINS);
    if k == 0 {
        return Err(BinningError::InvalidBinCount);
    }

    let mut values: Vec<f64> = reference.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return Err(BinningError::EmptyReference);
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut boundaries: Vec<f64> = Vec::with_capacity(k + 1);
    for i in 0..=k {
        let quantile = quantile_of_sorted(&values, i as f64 / k as f64);
        if boundaries.last().map_or(true, |&last| quantile > last) {
            boundaries.push(quantile);
        }
    }

    debug!(
        requested_bins = k,
        fitted_bins = boundaries.len().saturating_sub(1).max(1),
        "fitted numerical binning"
    );

    Ok(NumericalBinning { boundaries })
}

impl NumericalBinning {
    /// Boundary thresholds, strictly increasing; `num_bins() + 1` entries
    /// except in the degenerate single-value case
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of fitted bins, excluding the catch-all
    pub fn num_bins(&self) -> usize {
        (self.boundaries.len() - 1).max(1)
    }

    /// Lower and upper bound of a numbered bin, or `None` for an
    /// out-of-range index or the catch-all
    pub fn bounds(&self, bin: BinIndex) -> Option<(f64, f64)> {
        let i = bin.index()?;
        if i >= self.num_bins() {
            return None;
        }
        if self.boundaries.len() == 1 {
            return Some((self.boundaries[0], self.boundaries[0]));
        }
        Some((self.boundaries[i], self.boundaries[i + 1]))
    }

    /// Assign every value to its covering bin.
    ///
    /// Deterministic and idempotent: the fitted boundaries are never
    /// touched, so labeling the reference sample and labeling disjoint data
    /// use the same partition.
    pub fn label(&self, values: &[f64]) -> Vec<BinIndex> {
        values.iter().map(|&v| self.locate(v)).collect()
    }

    fn locate(&self, value: f64) -> BinIndex {
        if !value.is_finite() {
            return BinIndex::CatchAll;
        }
        let lower = self.boundaries[0];
        let upper = self.boundaries[self.boundaries.len() - 1];
        if value < lower || value > upper {
            return BinIndex::CatchAll;
        }
        if value == upper {
            // Final bin is closed above; also covers the zero-width case
            return BinIndex::Numbered(self.num_bins() - 1);
        }
        BinIndex::Numbered(self.boundaries.partition_point(|&b| b <= value) - 1)
    }
}

// The persisted form is a reload interface; labeling leans on the strictly
// increasing, non-empty boundary invariant, so a load that cannot uphold it
// must fail instead of producing a binning that panics or mislabels.
impl<'de> Deserialize<'de> for NumericalBinning {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Persisted {
            boundaries: Vec<f64>,
        }
        let persisted = Persisted::deserialize(deserializer)?;
        if persisted.boundaries.is_empty() {
            return Err(D::Error::custom("boundary list must not be empty"));
        }
        if persisted.boundaries.iter().any(|b| !b.is_finite()) {
            return Err(D::Error::custom("boundaries must be finite"));
        }
        if persisted.boundaries.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(D::Error::custom("boundaries must be strictly increasing"));
        }
        Ok(NumericalBinning {
            boundaries: persisted.boundaries,
        })
    }
}

/// Quantile of an already-sorted slice, linear interpolation between ranks
fn quantile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(sorted.len() - 1);
    let fraction = rank - lower_idx as f64;
    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_bins_cover_observed_range() {
        let reference = vec![0.2, 1.4, 2.9, 3.1, 8.7];
        let binning = fit_numerical(&reference, Some(2)).unwrap();

        assert_eq!(binning.num_bins(), 2);
        assert_eq!(binning.boundaries(), &[0.2, 2.9, 8.7]);
        // Contiguous: bin 0 upper bound == bin 1 lower bound
        let (_, up0) = binning.bounds(BinIndex::Numbered(0)).unwrap();
        let (lo1, _) = binning.bounds(BinIndex::Numbered(1)).unwrap();
        assert_eq!(up0, lo1);
    }

    #[test]
    fn test_label_in_range_and_beyond_max() {
        let reference = vec![0.2, 1.4, 2.9, 3.1, 8.7];
        let binning = fit_numerical(&reference, Some(2)).unwrap();

        assert_eq!(
            binning.label(&[1.0, 9.0]),
            vec![BinIndex::Numbered(0), BinIndex::CatchAll]
        );
    }

    #[test]
    fn test_boundaries_strictly_increasing() {
        let reference: Vec<f64> = (0..500).map(|x| (x as f64).powi(2)).collect();
        let binning = fit_numerical(&reference, None).unwrap();

        for pair in binning.boundaries().windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_skewed_reference_collapses_duplicate_quantiles() {
        // Heavily skewed: most mass at 0.0, a few large values
        let mut reference = vec![0.0; 95];
        reference.extend([1.0, 2.0, 5.0, 7.0, 10.0]);
        let binning = fit_numerical(&reference, Some(10)).unwrap();

        // Far fewer than 10 bins survive, but all are non-empty intervals
        assert!(binning.num_bins() < 10);
        for pair in binning.boundaries().windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(binning.label(&[0.0])[0], BinIndex::Numbered(0));
    }

    #[test]
    fn test_every_finite_value_maps_to_exactly_one_bin() {
        let reference = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let binning = fit_numerical(&reference, Some(4)).unwrap();

        let probes = [-100.0, 1.0, 2.5, 4.0, 5.5, 7.999, 8.0, 8.001, 1e12];
        for &probe in &probes {
            let bin = binning.label(&[probe])[0];
            match bin {
                BinIndex::Numbered(i) => {
                    let (lo, up) = binning.bounds(bin).unwrap();
                    assert!(probe >= lo);
                    if i == binning.num_bins() - 1 {
                        assert!(probe <= up);
                    } else {
                        assert!(probe < up);
                    }
                }
                BinIndex::CatchAll => {
                    assert!(probe < reference[0] || probe > reference[7]);
                }
            }
        }
    }

    #[test]
    fn test_observed_max_falls_in_last_bin() {
        let reference = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let binning = fit_numerical(&reference, Some(2)).unwrap();
        assert_eq!(binning.label(&[5.0])[0], BinIndex::Numbered(1));
    }

    #[test]
    fn test_constant_reference_single_bin() {
        let reference = vec![3.5, 3.5, 3.5, 3.5];
        let binning = fit_numerical(&reference, Some(4)).unwrap();

        assert_eq!(binning.num_bins(), 1);
        assert_eq!(binning.bounds(BinIndex::Numbered(0)), Some((3.5, 3.5)));
        assert_eq!(
            binning.label(&[3.5, 3.6]),
            vec![BinIndex::Numbered(0), BinIndex::CatchAll]
        );
    }

    #[test]
    fn test_missing_values_label_catch_all() {
        let reference = vec![1.0, 2.0, 3.0, 4.0];
        let binning = fit_numerical(&reference, Some(2)).unwrap();
        assert_eq!(binning.label(&[f64::NAN])[0], BinIndex::CatchAll);
    }

    #[test]
    fn test_nan_in_reference_ignored_for_fit() {
        let reference = vec![1.0, f64::NAN, 2.0, 3.0, f64::NAN, 4.0];
        let binning = fit_numerical(&reference, Some(2)).unwrap();
        assert_eq!(binning.boundaries()[0], 1.0);
        assert_eq!(*binning.boundaries().last().unwrap(), 4.0);
    }

    #[test]
    fn test_label_never_refits() {
        let reference = vec![0.2, 1.4, 2.9, 3.1, 8.7];
        let binning = fit_numerical(&reference, Some(2)).unwrap();
        let before = binning.boundaries().to_vec();

        let _ = binning.label(&reference);
        let _ = binning.label(&[100.0, -50.0, 2.0]);
        let _ = binning.label(&[]);

        assert_eq!(binning.boundaries(), before.as_slice());
    }

    #[test]
    fn test_labeling_is_idempotent() {
        let reference: Vec<f64> = (0..100).map(|x| x as f64 * 0.37).collect();
        let binning = fit_numerical(&reference, Some(5)).unwrap();
        let probe: Vec<f64> = (0..50).map(|x| x as f64 * 0.91 - 3.0).collect();

        let first = binning.label(&probe);
        let second = binning.label(&probe);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_reference_rejected() {
        assert!(matches!(
            fit_numerical(&[], Some(3)),
            Err(BinningError::EmptyReference)
        ));
        assert!(matches!(
            fit_numerical(&[f64::NAN, f64::NAN], Some(3)),
            Err(BinningError::EmptyReference)
        ));
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(matches!(
            fit_numerical(&[1.0, 2.0], Some(0)),
            Err(BinningError::InvalidBinCount)
        ));
    }

    #[test]
    fn test_deserialize_rejects_empty_boundaries() {
        let result = serde_json::from_str::<NumericalBinning>(r#"{"boundaries":[]}"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_deserialize_rejects_non_increasing_boundaries() {
        for json in [
            r#"{"boundaries":[5.0,1.0,3.0]}"#,
            r#"{"boundaries":[1.0,1.0,3.0]}"#,
        ] {
            let result = serde_json::from_str::<NumericalBinning>(json);
            assert!(result.is_err());
            assert!(
                result
                    .unwrap_err()
                    .to_string()
                    .contains("strictly increasing")
            );
        }
    }

    #[test]
    fn test_deserialize_rejects_non_finite_boundaries() {
        // 1e999 overflows to infinity when parsed
        let result = serde_json::from_str::<NumericalBinning>(r#"{"boundaries":[1.0,1e999]}"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("finite"));
    }

    #[test]
    fn test_deserialize_accepts_single_boundary() {
        // Degenerate constant-reference partition survives persistence
        let reloaded: NumericalBinning =
            serde_json::from_str(r#"{"boundaries":[3.5]}"#).unwrap();
        assert_eq!(reloaded.num_bins(), 1);
        assert_eq!(
            reloaded.label(&[3.5, 4.0]),
            vec![BinIndex::Numbered(0), BinIndex::CatchAll]
        );
    }

    #[test]
    fn test_serde_round_trip_preserves_labeling() {
        let reference: Vec<f64> = (0..200).map(|x| (x as f64).sqrt()).collect();
        let binning = fit_numerical(&reference, Some(6)).unwrap();

        let json = serde_json::to_string(&binning).unwrap();
        let reloaded: NumericalBinning = serde_json::from_str(&json).unwrap();

        let probe: Vec<f64> = (0..50).map(|x| x as f64 * 0.3).collect();
        assert_eq!(binning.label(&probe), reloaded.label(&probe));
        assert_eq!(binning, reloaded);
    }
}
