//! Categorical Binning
//!
//! One bin per distinct category observed in the reference sample, in sorted
//! order. Categories unseen at fit time label as the catch-all bin. The
//! persisted form is the ordered category list; the lookup map is rebuilt on
//! load.

use crate::{BinIndex, BinningError};
use fxhash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// An immutable partition of a categorical domain into ordered bins
#[derive(Debug, Clone, Serialize)]
pub struct CategoricalBinning {
    categories: Vec<String>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

/// Fit a categorical binning over a reference sample.
///
/// Bin order is the sorted order of the distinct observed categories, so
/// fitting the same reference always yields the same partition.
pub fn fit_categorical(reference: &[&str]) -> Result<CategoricalBinning, BinningError> {
    if reference.is_empty() {
        return Err(BinningError::EmptyReference);
    }

    let distinct: BTreeSet<&str> = reference.iter().copied().collect();
    let categories: Vec<String> = distinct.into_iter().map(String::from).collect();

    debug!(categories = categories.len(), "fitted categorical binning");

    Ok(CategoricalBinning::from_categories(categories))
}

impl CategoricalBinning {
    fn from_categories(categories: Vec<String>) -> Self {
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { categories, index }
    }

    /// Fitted categories in bin order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of fitted bins, excluding the catch-all
    pub fn num_bins(&self) -> usize {
        self.categories.len()
    }

    /// Category of a numbered bin, or `None` for an out-of-range index or
    /// the catch-all
    pub fn category(&self, bin: BinIndex) -> Option<&str> {
        self.categories.get(bin.index()?).map(String::as_str)
    }

    /// Assign every value to its bin; unseen categories go to the catch-all.
    ///
    /// Deterministic and idempotent: the fitted mapping is never touched.
    pub fn label(&self, values: &[&str]) -> Vec<BinIndex> {
        values
            .iter()
            .map(|v| match self.index.get(*v) {
                Some(&i) => BinIndex::Numbered(i),
                None => BinIndex::CatchAll,
            })
            .collect()
    }
}

impl PartialEq for CategoricalBinning {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories
    }
}

impl<'de> Deserialize<'de> for CategoricalBinning {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Persisted {
            categories: Vec<String>,
        }
        let persisted = Persisted::deserialize(deserializer)?;
        Ok(CategoricalBinning::from_categories(persisted.categories))
    }
}
