#![warn(missing_docs)]
//! # Splitstat
//!
//! Statistical analysis of randomized controlled trials ("A/B tests").
//!
//! Given numeric observations per variant, splitstat computes rigorous
//! comparisons between a control variant and one or more treatments:
//! - **Delta estimation**: difference of means with a confidence interval,
//!   via a closed-form Welch approximation or bootstrap resampling over
//!   arbitrary percentiles
//! - **Chi-square homogeneity**: categorical distribution comparison
//! - **Binning**: reusable numeric/categorical partitions fit on a reference
//!   sample and applied deterministically to any later sample, for
//!   stratified ("binned") analyses
//!
//! Data loading, report assembly, and formula evaluation for derived KPIs
//! are the caller's concern; splitstat takes cleaned-or-cleanable numeric
//! slices and hands back structured, serializable results.
//!
//! ## Quick Start
//!
//! ```
//! use splitstat::{DeltaConfig, compute_delta};
//!
//! let control = vec![10.0, 11.5, 9.8, 10.4, 10.9];
//! let treatment = vec![11.2, 12.1, 10.9, 11.8, 12.4, 11.5];
//!
//! let result = compute_delta(&treatment, &control, &DeltaConfig::default()).unwrap();
//! assert!(result.delta > 0.0);
//! assert_eq!(result.confidence_interval.len(), 2);
//! ```
//!
//! ## Stratified analysis
//!
//! ```
//! use splitstat::{BinIndex, fit_numerical};
//!
//! // Fit bins on a reference column, then partition any later column with
//! // the same (immutable) boundaries.
//! let reference = vec![0.2, 1.4, 2.9, 3.1, 8.7];
//! let binning = fit_numerical(&reference, Some(2)).unwrap();
//! assert_eq!(
//!     binning.label(&[1.0, 9.0]),
//!     vec![BinIndex::Numbered(0), BinIndex::CatchAll]
//! );
//! ```

// Re-export the statistics engine
pub use splitstat_stats::{
    ChiSquareError, ChiSquareResult, DEFAULT_BOOTSTRAP_SAMPLES, DEFAULT_PERCENTILES, DeltaConfig,
    DeltaError, DeltaMethod, DeltaResult, MIN_EXPECTED_CELL_COUNT, PercentileValue,
    SamplingError, VARIANCE_RATIO_WARN_THRESHOLD, chi_square, compute_delta, drop_missing,
    drop_missing_paired, empirical_percentile,
};

// Re-export the binning model
pub use splitstat_binning::{
    BinFormatter, BinIndex, BinningError, CATCH_ALL_LABEL, CategoricalBinning, DEFAULT_NUM_BINS,
    NumericalBinning, fit_categorical, fit_numerical,
};
