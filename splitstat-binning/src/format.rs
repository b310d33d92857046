//! Bin Formatting
//!
//! Pure presentation: renders a bin as a human-readable string from a
//! template. Formatting never consults or alters partition state, so
//! changing the template can never change which bin a value labels to.
//!
//! Recognized placeholders:
//! - `{index}`    zero-based bin index
//! - `{lo}`       lower bound (numerical bins)
//! - `{up}`       upper bound (numerical bins)
//! - `{label}`    caller-supplied per-bin display label, falling back to the
//!   index (numerical) or category (categorical)
//! - `{interval}` canonical notation: `[lo, up)`, closed `[lo, up]` for the
//!   final bin; for categorical bins this is the category itself
//! - `{category}` category value (categorical bins)

use crate::{BinIndex, CATCH_ALL_LABEL, CategoricalBinning, NumericalBinning};

/// Template-driven bin renderer
#[derive(Debug, Clone)]
pub struct BinFormatter {
    template: String,
    labels: Vec<String>,
    catch_all: String,
}

impl Default for BinFormatter {
    fn default() -> Self {
        Self::new("{interval}")
    }
}

impl BinFormatter {
    /// Formatter rendering each bin through `template`
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            labels: Vec::new(),
            catch_all: CATCH_ALL_LABEL.to_string(),
        }
    }

    /// Attach per-bin display labels, used by the `{label}` placeholder
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Override the catch-all bin's rendering (default "unknown")
    pub fn with_catch_all(mut self, text: impl Into<String>) -> Self {
        self.catch_all = text.into();
        self
    }

    /// Render a bin of a numerical binning
    pub fn format_numerical(&self, binning: &NumericalBinning, bin: BinIndex) -> String {
        let Some(i) = bin.index() else {
            return self.catch_all.clone();
        };
        let Some((lo, up)) = binning.bounds(bin) else {
            return self.catch_all.clone();
        };

        let closing = if i == binning.num_bins() - 1 { "]" } else { ")" };
        let interval = format!("[{lo}, {up}{closing}");
        let label = self
            .labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| i.to_string());

        self.template
            .replace("{interval}", &interval)
            .replace("{lo}", &lo.to_string())
            .replace("{up}", &up.to_string())
            .replace("{label}", &label)
            .replace("{index}", &i.to_string())
    }

    /// Render a bin of a categorical binning
    pub fn format_categorical(&self, binning: &CategoricalBinning, bin: BinIndex) -> String {
        let Some(i) = bin.index() else {
            return self.catch_all.clone();
        };
        let Some(category) = binning.category(bin) else {
            return self.catch_all.clone();
        };

        let label = self
            .labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| category.to_string());

        self.template
            .replace("{interval}", category)
            .replace("{category}", category)
            .replace("{label}", &label)
            .replace("{index}", &i.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fit_categorical, fit_numerical};

    #[test]
    fn test_default_interval_notation() {
        let binning = fit_numerical(&[0.2, 1.4, 2.9, 3.1, 8.7], Some(2)).unwrap();
        let fmt = BinFormatter::default();

        assert_eq!(
            fmt.format_numerical(&binning, BinIndex::Numbered(0)),
            "[0.2, 2.9)"
        );
        // Final bin closed on the upper end
        assert_eq!(
            fmt.format_numerical(&binning, BinIndex::Numbered(1)),
            "[2.9, 8.7]"
        );
        assert_eq!(
            fmt.format_numerical(&binning, BinIndex::CatchAll),
            "unknown"
        );
    }

    #[test]
    fn test_custom_template_with_labels() {
        let binning = fit_numerical(&[1.0, 2.0, 3.0, 4.0], Some(2)).unwrap();
        let fmt = BinFormatter::new("{label}: {lo}..{up}")
            .with_labels(vec!["A".to_string(), "B".to_string()]);

        assert_eq!(
            fmt.format_numerical(&binning, BinIndex::Numbered(1)),
            "B: 2.5..4"
        );
    }

    #[test]
    fn test_label_falls_back_to_index() {
        let binning = fit_numerical(&[1.0, 2.0, 3.0, 4.0], Some(2)).unwrap();
        let fmt = BinFormatter::new("bin {label}");

        assert_eq!(
            fmt.format_numerical(&binning, BinIndex::Numbered(0)),
            "bin 0"
        );
    }

    #[test]
    fn test_custom_catch_all_text() {
        let binning = fit_numerical(&[1.0, 2.0], Some(1)).unwrap();
        let fmt = BinFormatter::default().with_catch_all("n/a");

        assert_eq!(fmt.format_numerical(&binning, BinIndex::CatchAll), "n/a");
    }

    #[test]
    fn test_categorical_rendering() {
        let binning = fit_categorical(&["de", "fr", "us"]).unwrap();
        let fmt = BinFormatter::new("{index}={category}");

        assert_eq!(
            fmt.format_categorical(&binning, BinIndex::Numbered(1)),
            "1=fr"
        );
        assert_eq!(
            fmt.format_categorical(&binning, BinIndex::CatchAll),
            "unknown"
        );
    }

    #[test]
    fn test_out_of_range_bin_renders_as_catch_all() {
        let binning = fit_numerical(&[1.0, 2.0], Some(1)).unwrap();
        let fmt = BinFormatter::default();
        assert_eq!(
            fmt.format_numerical(&binning, BinIndex::Numbered(9)),
            "unknown"
        );
    }

    #[test]
    fn test_template_change_never_moves_labels() {
        let binning = fit_numerical(&[1.0, 2.0, 3.0, 4.0, 5.0], Some(2)).unwrap();
        let probe = vec![1.5, 3.5, 9.0];
        let before = binning.label(&probe);

        let _ = BinFormatter::new("{label} {interval} {index}")
            .with_labels(vec!["x".to_string()])
            .format_numerical(&binning, BinIndex::Numbered(0));

        assert_eq!(binning.label(&probe), before);
    }
}
