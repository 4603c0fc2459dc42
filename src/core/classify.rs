//! NCBI species label cleanup and unclassified detection.
//!
//! Assembly reports carry strain suffixes and placeholder markers
//! ("Acinetobacter sp. ABC123", "uncultured bacterium"). A label is kept
//! only when it names a real binomial; everything else counts as
//! NCBI-unclassified.

use regex::RegexSet;

/// Outcome of classifying one raw NCBI species label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Cleaned binomial (genus + species epithet, strain suffix stripped)
    Classified(String),
    /// Missing label or placeholder marker
    Unclassified,
}

impl Classification {
    pub fn species(&self) -> Option<&str> {
        match self {
            Classification::Classified(name) => Some(name),
            Classification::Unclassified => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Classification::Classified(_))
    }
}

/// Applies the placeholder-pattern heuristic to raw NCBI labels
pub struct LabelClassifier {
    patterns: RegexSet,
}

impl LabelClassifier {
    /// Build a classifier from substring patterns, matched case-insensitively.
    /// Patterns anchor at a word boundary so "sp." does not hit "subsp.".
    pub fn new(patterns: &[String]) -> crate::Result<Self> {
        let escaped: Vec<String> = patterns
            .iter()
            .map(|p| format!("(?i)\\b{}", regex::escape(p)))
            .collect();
        let patterns = RegexSet::new(&escaped)
            .map_err(|e| crate::HarmoniaError::Config(format!("Bad pattern set: {}", e)))?;
        Ok(Self { patterns })
    }

    pub fn with_defaults() -> crate::Result<Self> {
        Self::new(&crate::core::config::default_unclassified_patterns())
    }

    /// Classify a raw label: missing or placeholder labels are unclassified,
    /// anything else is truncated to its first two whitespace-delimited
    /// tokens (genus + species epithet)
    pub fn classify(&self, label: Option<&str>) -> Classification {
        let label = match label {
            Some(l) if !l.trim().is_empty() => l.trim(),
            _ => return Classification::Unclassified,
        };

        if self.patterns.is_match(label) {
            return Classification::Unclassified;
        }

        let binomial: Vec<&str> = label.split_whitespace().take(2).collect();
        Classification::Classified(binomial.join(" "))
    }
}
