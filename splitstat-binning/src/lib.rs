#![warn(missing_docs)]
//! Splitstat Binning Model
//!
//! Derives reusable partitions of a numeric or categorical domain from a
//! reference sample and applies them deterministically to any later sample:
//! - `NumericalBinning`: quantile-based boundary thresholds, denser where the
//!   reference data is denser, so skewed distributions avoid near-empty bins
//! - `CategoricalBinning`: one bin per distinct observed category
//!
//! Every binning carries an implicit catch-all bin for values outside the
//! fitted domain. A fitted binning is immutable; labeling never refits.
//! Rendering bins as strings is a separate, purely presentational concern
//! (see [`BinFormatter`]).

mod bin;
mod categorical;
mod format;
mod numerical;

pub use bin::BinIndex;
pub use categorical::{CategoricalBinning, fit_categorical};
pub use format::BinFormatter;
pub use numerical::{NumericalBinning, fit_numerical};

use thiserror::Error;

/// Default number of bins for a numerical fit
pub const DEFAULT_NUM_BINS: usize = 8;

/// Display text for the catch-all bin
pub const CATCH_ALL_LABEL: &str = "unknown";

/// Errors from fitting a binning
#[derive(Debug, Clone, Error)]
pub enum BinningError {
    /// The reference sample had no usable observations
    #[error("Reference sample is empty after dropping missing values")]
    EmptyReference,
    /// A zero bin count was requested
    #[error("Bin count must be at least 1")]
    InvalidBinCount,
}
