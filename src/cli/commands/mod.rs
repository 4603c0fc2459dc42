pub mod report;
pub mod stats;
pub mod validate;

use crate::cli::formatter::create_spinner_style;
use crate::core::classify::LabelClassifier;
use crate::core::concordance::ConcordanceTable;
use crate::core::config::{self, Config};
use crate::core::join::{join_tables, GenomeRecord};
use crate::core::paths;
use crate::io::tables::{self, ClusterAssignment};
use clap::Args;
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Input selection shared by every subcommand. Explicit flags win over
/// the config file, which wins over the data-dir defaults.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Genome -> cluster assignment CSV
    #[arg(short, long, value_name = "FILE")]
    pub assignments: Option<PathBuf>,

    /// Cluster -> species name CSV
    #[arg(short, long, value_name = "FILE")]
    pub clusters: Option<PathBuf>,

    /// Genome -> NCBI assembly metadata CSV
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Config file (defaults to ~/.harmonia/config.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub(crate) struct PipelineInputs {
    pub config: Config,
    pub assignments: Vec<ClusterAssignment>,
    pub records: Vec<GenomeRecord>,
    pub classifier: LabelClassifier,
    pub table: ConcordanceTable,
}

pub(crate) fn load_inputs(args: &InputArgs) -> anyhow::Result<PipelineInputs> {
    let config = resolve_config(args)?;

    let assignments_path = resolve_path(
        &args.assignments,
        &config.inputs.assignments,
        paths::assignments_path,
    );
    let clusters_path = resolve_path(
        &args.clusters,
        &config.inputs.clusters,
        paths::clusters_path,
    );
    let metadata_path = resolve_path(
        &args.metadata,
        &config.inputs.metadata,
        paths::metadata_path,
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message("Loading input tables...");

    let assignments = tables::load_assignments(&assignments_path)?;
    let clusters = tables::load_cluster_species(&clusters_path)?;
    let metadata = tables::load_metadata(&metadata_path)?;
    spinner.set_message("Joining tables...");

    let classifier = LabelClassifier::new(&config.classification.unclassified_patterns)?;
    let records = join_tables(&assignments, &clusters, &metadata, &classifier)?;
    let table = ConcordanceTable::from_records(&records);

    spinner.finish_with_message(format!(
        "Loaded {} genomes across {} clusters",
        records.len(),
        clusters.len()
    ));

    Ok(PipelineInputs {
        config,
        assignments,
        records,
        classifier,
        table,
    })
}

fn resolve_config(args: &InputArgs) -> anyhow::Result<Config> {
    if let Some(path) = &args.config {
        return Ok(config::load_config(path)?);
    }
    let default_path = paths::config_path();
    if default_path.exists() {
        Ok(config::load_config(default_path)?)
    } else {
        Ok(Config::default())
    }
}

fn resolve_path(
    flag: &Option<PathBuf>,
    configured: &Option<String>,
    default: fn() -> PathBuf,
) -> PathBuf {
    flag.clone()
        .or_else(|| configured.as_ref().map(PathBuf::from))
        .unwrap_or_else(default)
}
