//! Delta Estimation
//!
//! Compares a treatment sample against a control sample and reports the
//! difference of means with a confidence interval. Two methods implement the
//! same contract:
//! - `WelchNormal`: closed-form normal approximation with unequal variances
//!   and Welch-Satterthwaite degrees of freedom, O(n)
//! - `Bootstrap`: empirical percentiles over resampled deltas,
//!   O(n * n_samples) and materially slower; use when normality is violated

use crate::bootstrap::bootstrap_interval;
use crate::sampling::drop_missing;
use crate::{DEFAULT_BOOTSTRAP_SAMPLES, DEFAULT_PERCENTILES, VARIANCE_RATIO_WARN_THRESHOLD};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;
use tracing::debug;

/// Estimation method for the confidence interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaMethod {
    /// Closed-form Welch approximation (unequal variances, unequal sizes)
    WelchNormal,
    /// Nonparametric bootstrap over resampled delta distributions
    Bootstrap {
        /// Number of resamples to draw (must be at least 1)
        n_samples: usize,
        /// Fixed seed for reproducible resampling; `None` uses thread RNG
        seed: Option<u64>,
    },
}

/// Configuration for delta estimation
#[derive(Debug, Clone)]
pub struct DeltaConfig {
    /// Requested confidence-interval percentiles, each in [0, 100].
    /// Each percentile is mapped independently, so one-sided and asymmetric
    /// requests are supported.
    pub percentiles: Vec<f64>,
    /// Which estimation method to run
    pub method: DeltaMethod,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            method: DeltaMethod::WelchNormal,
        }
    }
}

impl DeltaMethod {
    /// Bootstrap with the default resample count and no fixed seed
    pub fn bootstrap() -> Self {
        DeltaMethod::Bootstrap {
            n_samples: DEFAULT_BOOTSTRAP_SAMPLES,
            seed: None,
        }
    }
}

/// One point of the confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    /// Requested percentile in [0, 100]
    pub percentile: f64,
    /// Interval value at that percentile
    pub value: f64,
}

/// Result of comparing a treatment sample against a control sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaResult {
    /// treatment_mean - control_mean; exactly 0.0 for identical samples
    pub delta: f64,
    /// Mean of the cleaned control sample
    pub control_mean: f64,
    /// Mean of the cleaned treatment sample
    pub treatment_mean: f64,
    /// Non-missing observations in control
    pub control_sample_size: usize,
    /// Non-missing observations in treatment
    pub treatment_sample_size: usize,
    /// Interval values, one per requested percentile, non-decreasing in value
    pub confidence_interval: Vec<PercentileValue>,
    /// Advisory messages; never block the result
    pub warnings: Vec<String>,
}

/// Errors from delta estimation
#[derive(Debug, Clone, Error)]
pub enum DeltaError {
    /// Treatment sample had no usable observations
    #[error("Treatment sample is empty after dropping missing values")]
    EmptyTreatment,
    /// Control sample had no usable observations
    #[error("Control sample is empty after dropping missing values")]
    EmptyControl,
    /// The percentile list was empty
    #[error("At least one confidence-interval percentile must be requested")]
    NoPercentiles,
    /// A percentile fell outside [0, 100]
    #[error("Percentile {0} is outside [0, 100]")]
    PercentileOutOfRange(f64),
    /// The bootstrap resample count was zero
    #[error("Bootstrap resample count must be at least 1, got {0}")]
    InvalidBootstrapCount(usize),
}

/// Estimate the delta between treatment and control with a confidence interval.
///
/// Samples are unpaired and may differ in length; each is cleaned of missing
/// values independently. Variance heterogeneity under the Welch path is
/// reported as a warning on the result, not an error.
pub fn compute_delta(
    treatment: &[f64],
    control: &[f64],
    config: &DeltaConfig,
) -> Result<DeltaResult, DeltaError> {
    if config.percentiles.is_empty() {
        return Err(DeltaError::NoPercentiles);
    }
    for &p in &config.percentiles {
        if !(0.0..=100.0).contains(&p) || p.is_nan() {
            return Err(DeltaError::PercentileOutOfRange(p));
        }
    }
    if let DeltaMethod::Bootstrap { n_samples, .. } = config.method {
        if n_samples < 1 {
            return Err(DeltaError::InvalidBootstrapCount(n_samples));
        }
    }

    let treatment = drop_missing(treatment);
    let control = drop_missing(control);
    if treatment.is_empty() {
        return Err(DeltaError::EmptyTreatment);
    }
    if control.is_empty() {
        return Err(DeltaError::EmptyControl);
    }

    debug!(
        treatment_n = treatment.len(),
        control_n = control.len(),
        method = ?config.method,
        "computing delta"
    );

    let treatment_mean = mean(&treatment);
    let control_mean = mean(&control);
    let delta = treatment_mean - control_mean;

    let mut warnings = Vec::new();
    let confidence_interval = match config.method {
        DeltaMethod::WelchNormal => {
            welch_interval(&treatment, &control, delta, &config.percentiles, &mut warnings)
        }
        DeltaMethod::Bootstrap { n_samples, seed } => {
            bootstrap_interval(&treatment, &control, &config.percentiles, n_samples, seed)
        }
    };

    Ok(DeltaResult {
        delta,
        control_mean,
        treatment_mean,
        control_sample_size: control.len(),
        treatment_sample_size: treatment.len(),
        confidence_interval,
        warnings,
    })
}

/// Closed-form interval: delta + t_df(p) * se for each requested percentile
fn welch_interval(
    treatment: &[f64],
    control: &[f64],
    delta: f64,
    percentiles: &[f64],
    warnings: &mut Vec<String>,
) -> Vec<PercentileValue> {
    let nt = treatment.len() as f64;
    let nc = control.len() as f64;
    let var_t = sample_variance(treatment);
    let var_c = sample_variance(control);

    check_variance_ratio(var_t, var_c, warnings);

    let vt = var_t / nt;
    let vc = var_c / nc;
    let se_sq = vt + vc;

    // Zero standard error: both samples are constant. Every interval value
    // collapses onto the delta itself.
    if se_sq <= 0.0 {
        return percentiles
            .iter()
            .map(|&p| PercentileValue {
                percentile: p,
                value: delta,
            })
            .collect();
    }
    let se = se_sq.sqrt();

    // Welch-Satterthwaite degrees of freedom. A zero-variance side
    // contributes nothing to the denominator, which keeps the single-sample
    // case out of 0/0 territory.
    let mut df_denom = 0.0;
    if var_t > 0.0 {
        df_denom += vt * vt / (nt - 1.0);
    }
    if var_c > 0.0 {
        df_denom += vc * vc / (nc - 1.0);
    }
    let df = se_sq * se_sq / df_denom;

    // df > 0 by construction, so this cannot fail
    let t_dist = StudentsT::new(0.0, 1.0, df).unwrap();

    percentiles
        .iter()
        .map(|&p| {
            let value = if p <= 0.0 {
                f64::NEG_INFINITY
            } else if p >= 100.0 {
                f64::INFINITY
            } else {
                delta + t_dist.inverse_cdf(p / 100.0) * se
            };
            PercentileValue {
                percentile: p,
                value,
            }
        })
        .collect()
}

/// Warn when the sample-variance ratio makes the equal-variance reading of
/// the interval unreliable
fn check_variance_ratio(var_t: f64, var_c: f64, warnings: &mut Vec<String>) {
    let (hi, lo) = if var_t >= var_c {
        (var_t, var_c)
    } else {
        (var_c, var_t)
    };
    if hi <= 0.0 {
        return;
    }
    let ratio = if lo > 0.0 { hi / lo } else { f64::INFINITY };
    if ratio > VARIANCE_RATIO_WARN_THRESHOLD {
        warnings.push(format!(
            "Sample variances differ by a factor of {:.1} (threshold {}); \
             the Welch interval may be unreliable",
            ratio, VARIANCE_RATIO_WARN_THRESHOLD
        ));
    }
}

pub(crate) fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased sample variance; 0.0 for fewer than two observations
fn sample_variance(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64
}
