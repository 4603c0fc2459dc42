pub mod charts;
pub mod commands;
pub mod formatter;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "harmonia",
    version,
    about = "Concordance analysis between a de-novo clustering taxonomy and NCBI species labels",
    long_about = "Harmonia joins a genome clustering (the CNI taxonomy) with NCBI assembly \
                  metadata, flags placeholder species labels, scores per-species concordance \
                  with the inverse Simpson index, and renders the reassignment and \
                  reclassification charts as a composed publication figure."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis and write charts, figure and summary report
    Report(commands::report::ReportArgs),

    /// Print summary tables for the joined genome table
    Stats(commands::stats::StatsArgs),

    /// Run data-quality checks on the input tables
    Validate(commands::validate::ValidateArgs),
}
