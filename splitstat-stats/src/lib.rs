#![warn(missing_docs)]
//! Splitstat Statistical Engine
//!
//! Provides the statistical core for A/B test analysis:
//! - Delta estimation (treatment mean minus control mean) with confidence
//!   intervals via a closed-form Welch approximation or bootstrap resampling
//! - Chi-square homogeneity test for categorical samples
//! - NaN-aware sample cleaning and empirical percentile computation
//!
//! Advisory conditions (variance heterogeneity, sparse contingency cells) are
//! attached to results as warnings; only malformed input is an error.

mod bootstrap;
mod chi_square;
mod delta;
mod percentiles;
mod sampling;

pub use chi_square::{ChiSquareError, ChiSquareResult, chi_square};
pub use delta::{
    DeltaConfig, DeltaError, DeltaMethod, DeltaResult, PercentileValue, compute_delta,
};
pub use percentiles::empirical_percentile;
pub use sampling::{SamplingError, drop_missing, drop_missing_paired};

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 10_000;

/// Default confidence-interval percentiles (central 95%)
pub const DEFAULT_PERCENTILES: [f64; 2] = [2.5, 97.5];

/// Sample-variance ratio above which the Welch path warns about heterogeneity
pub const VARIANCE_RATIO_WARN_THRESHOLD: f64 = 4.0;

/// Expected contingency-cell count below which chi-square warns
pub const MIN_EXPECTED_CELL_COUNT: f64 = 5.0;
