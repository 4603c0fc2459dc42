//! Chart rendering for the concordance report.
//!
//! Each panel is drawn onto a generic drawing area so the same code
//! backs the per-chart PNG diagnostics and the composed PNG/SVG figure.

pub mod bars;
pub mod compose;
pub mod scatter;

pub use compose::render_composed_figure;

use crate::HarmoniaError;

pub(crate) fn plot_err<E: std::fmt::Display>(e: E) -> HarmoniaError {
    HarmoniaError::Plot(e.to_string())
}

/// Shorten a species name so axis labels stay readable
pub(crate) fn short_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_label_keeps_short_names() {
        assert_eq!(short_label("Escherichia coli", 20), "Escherichia coli");
    }

    #[test]
    fn short_label_truncates_long_names() {
        let label = short_label("Candidatus Thermoplasmatota archaeon", 16);
        assert!(label.ends_with('…'));
        assert_eq!(label.chars().count(), 16);
    }
}
