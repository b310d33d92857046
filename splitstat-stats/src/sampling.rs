//! Sample Cleaning
//!
//! NaN-aware extraction of numeric vectors from raw input. Unpaired samples
//! are cleaned independently; paired samples drop a position when *either*
//! side is missing, so row correspondence survives cleaning.

use thiserror::Error;

/// Errors from sample-cleaning operations
#[derive(Debug, Clone, Error)]
pub enum SamplingError {
    /// Paired cleaning requires equal-length inputs
    #[error("Paired samples differ in length: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left sample
        left: usize,
        /// Length of the right sample
        right: usize,
    },
}

/// Remove missing entries (NaN or infinite) from a sample.
///
/// Relative order of the surviving values is preserved; the input is
/// untouched.
pub fn drop_missing(sample: &[f64]) -> Vec<f64> {
    sample.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Remove positions where either of two aligned samples is missing.
///
/// Used for row-correspondent data (e.g., a KPI column next to the column a
/// binning was fit on). Both outputs have the same length.
pub fn drop_missing_paired(
    left: &[f64],
    right: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), SamplingError> {
    if left.len() != right.len() {
        return Err(SamplingError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let mut left_out = Vec::with_capacity(left.len());
    let mut right_out = Vec::with_capacity(right.len());
    for (&l, &r) in left.iter().zip(right.iter()) {
        if l.is_finite() && r.is_finite() {
            left_out.push(l);
            right_out.push(r);
        }
    }
    Ok((left_out, right_out))
}
