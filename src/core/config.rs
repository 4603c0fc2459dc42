use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub inputs: InputConfig,
    pub classification: ClassificationConfig,
    pub charts: ChartConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Genome -> cluster assignment CSV (overrides the data-dir default)
    pub assignments: Option<String>,
    /// Cluster -> species name CSV
    pub clusters: Option<String>,
    /// Genome -> NCBI assembly metadata CSV
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Substring patterns marking an NCBI label as a placeholder
    /// (matched case-insensitively against the raw label)
    pub unclassified_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Number of species shown in the reassignment bar chart
    pub top_reassignments: usize,
    /// Pixel width of each chart panel
    pub panel_width: u32,
    /// Pixel height of each chart panel
    pub panel_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory (overrides HARMONIA_OUTPUT_DIR / ./output)
    pub output_dir: Option<String>,
    /// Summary report format: "text", "json" or "csv"
    pub report_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: InputConfig {
                assignments: None,
                clusters: None,
                metadata: None,
            },
            classification: ClassificationConfig {
                unclassified_patterns: default_unclassified_patterns(),
            },
            charts: ChartConfig {
                top_reassignments: 20,
                panel_width: 1200,
                panel_height: 700,
            },
            output: OutputConfig {
                output_dir: None,
                report_format: "text".to_string(),
            },
        }
    }
}

/// Placeholder species markers used by NCBI assembly reports
pub fn default_unclassified_patterns() -> Vec<String> {
    vec![
        "sp.".to_string(),
        "uncultured".to_string(),
        "unclassified".to_string(),
        "unidentified".to_string(),
        "bacterium".to_string(),
        "metagenome".to_string(),
    ]
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::HarmoniaError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::HarmoniaError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.classification.unclassified_patterns,
            config.classification.unclassified_patterns
        );
        assert_eq!(parsed.charts.top_reassignments, 20);
        assert_eq!(parsed.output.report_format, "text");
    }

    #[test]
    fn load_config_reads_overrides_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.classification.unclassified_patterns = vec!["candidatus".to_string()];
        config.charts.top_reassignments = 5;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.charts.top_reassignments, 5);
        assert_eq!(
            loaded.classification.unclassified_patterns,
            vec!["candidatus".to_string()]
        );
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "inputs = 7\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, crate::HarmoniaError::Config(_)));
    }
}
