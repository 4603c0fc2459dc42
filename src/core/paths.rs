use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static HARMONIA_HOME: OnceLock<PathBuf> = OnceLock::new();
static HARMONIA_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static HARMONIA_OUTPUT_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the Harmonia home directory
/// Checks HARMONIA_HOME environment variable, falls back to ${HOME}/.harmonia
pub fn harmonia_home() -> PathBuf {
    HARMONIA_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("HARMONIA_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".harmonia")
            }
        })
        .clone()
}

/// Get the input data directory
/// Checks HARMONIA_DATA_DIR environment variable, falls back to ./data
pub fn harmonia_data_dir() -> PathBuf {
    HARMONIA_DATA_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("HARMONIA_DATA_DIR") {
                PathBuf::from(path)
            } else {
                PathBuf::from("data")
            }
        })
        .clone()
}

/// Get the output directory
/// Checks HARMONIA_OUTPUT_DIR environment variable, falls back to ./output
pub fn harmonia_output_dir() -> PathBuf {
    HARMONIA_OUTPUT_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("HARMONIA_OUTPUT_DIR") {
                PathBuf::from(path)
            } else {
                PathBuf::from("output")
            }
        })
        .clone()
}

/// Directory for per-chart diagnostic PNGs
pub fn plots_dir() -> PathBuf {
    harmonia_output_dir().join("plots")
}

/// Directory for the composed publication figure
pub fn figures_dir() -> PathBuf {
    harmonia_output_dir().join("figures")
}

/// Default path of the genome -> cluster assignment table
pub fn assignments_path() -> PathBuf {
    harmonia_data_dir().join("genome_cluster_assignment.csv")
}

/// Default path of the cluster -> species name table
pub fn clusters_path() -> PathBuf {
    harmonia_data_dir().join("cluster_species_name.csv")
}

/// Default path of the genome -> NCBI assembly metadata table
pub fn metadata_path() -> PathBuf {
    harmonia_data_dir().join("genome_ncbi_metadata.csv")
}

/// Default config file location
pub fn config_path() -> PathBuf {
    harmonia_home().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_subdirectories_hang_off_output_dir() {
        let out = harmonia_output_dir();
        assert_eq!(plots_dir(), out.join("plots"));
        assert_eq!(figures_dir(), out.join("figures"));
    }

    #[test]
    fn default_input_paths_live_under_data_dir() {
        let data = harmonia_data_dir();
        assert!(assignments_path().starts_with(&data));
        assert!(clusters_path().starts_with(&data));
        assert!(metadata_path().starts_with(&data));
    }
}
