//! Chi-Square Homogeneity Test
//!
//! Tests whether two categorical samples are drawn from the same
//! distribution, over the union of categories observed in either sample.
//! Sparse expected cell counts are reported as a warning, not an error; the
//! statistic is still the best available estimate.

use crate::MIN_EXPECTED_CELL_COUNT;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Result of a chi-square homogeneity test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiSquareResult {
    /// Chi-square statistic, finite and non-negative
    pub statistic: f64,
    /// p-value in [0, 1] under the homogeneity hypothesis
    pub p_value: f64,
    /// Degrees of freedom: number of union categories minus one
    pub degrees_of_freedom: f64,
    /// Advisory messages (e.g., sparse expected counts)
    pub warnings: Vec<String>,
}

/// Errors from the chi-square test
#[derive(Debug, Clone, Error)]
pub enum ChiSquareError {
    /// One of the samples had no observations
    #[error("Both samples must contain at least one observation")]
    EmptySample,
    /// The union of observed categories was too small to test
    #[error("Chi-square requires at least 2 distinct categories, got {got}")]
    TooFewCategories {
        /// Number of distinct categories observed across both samples
        got: usize,
    },
}

/// Test two categorical samples for homogeneity.
///
/// Builds a 2 x K contingency table over the sorted union of observed
/// categories and compares observed against expected counts.
pub fn chi_square(sample_a: &[&str], sample_b: &[&str]) -> Result<ChiSquareResult, ChiSquareError> {
    if sample_a.is_empty() || sample_b.is_empty() {
        return Err(ChiSquareError::EmptySample);
    }

    // Sorted union of categories; BTreeMap keeps cell order deterministic.
    let mut cells: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for &category in sample_a {
        cells.entry(category).or_insert((0.0, 0.0)).0 += 1.0;
    }
    for &category in sample_b {
        cells.entry(category).or_insert((0.0, 0.0)).1 += 1.0;
    }

    let k = cells.len();
    if k < 2 {
        return Err(ChiSquareError::TooFewCategories { got: k });
    }

    debug!(categories = k, n_a = sample_a.len(), n_b = sample_b.len(), "chi-square test");

    let total_a = sample_a.len() as f64;
    let total_b = sample_b.len() as f64;
    let grand_total = total_a + total_b;

    let mut statistic = 0.0;
    let mut min_expected = f64::INFINITY;
    for &(count_a, count_b) in cells.values() {
        let column_total = count_a + count_b;
        let expected_a = total_a * column_total / grand_total;
        let expected_b = total_b * column_total / grand_total;
        min_expected = min_expected.min(expected_a).min(expected_b);

        statistic += (count_a - expected_a).powi(2) / expected_a;
        statistic += (count_b - expected_b).powi(2) / expected_b;
    }

    let mut warnings = Vec::new();
    if min_expected < MIN_EXPECTED_CELL_COUNT {
        warnings.push(format!(
            "Smallest expected cell count {:.2} is below {}; the chi-square \
             approximation may be unreliable",
            min_expected, MIN_EXPECTED_CELL_COUNT
        ));
    }

    let degrees_of_freedom = (k - 1) as f64;
    // df >= 1 here, so construction cannot fail
    let dist = ChiSquared::new(degrees_of_freedom).unwrap();
    let p_value = (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0);

    Ok(ChiSquareResult {
        statistic,
        p_value,
        degrees_of_freedom,
        warnings,
    })
}
