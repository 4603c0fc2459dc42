use clap::Parser;
use colored::*;
use harmonia::cli::{Cli, Commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging with HARMONIA_LOG environment variable support
    let log_level = std::env::var("HARMONIA_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<harmonia::HarmoniaError>() {
            Some(harmonia::HarmoniaError::Config(_)) => 2,
            Some(harmonia::HarmoniaError::Io(_)) => 3,
            Some(harmonia::HarmoniaError::Csv(_))
            | Some(harmonia::HarmoniaError::Parse(_))
            | Some(harmonia::HarmoniaError::Table(_)) => 4,
            Some(harmonia::HarmoniaError::Plot(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .expect("Failed to initialize thread pool");

    if cli.verbose > 0 {
        eprintln!("Using {} threads", num_threads);
    }

    match cli.command {
        Commands::Report(args) => harmonia::cli::commands::report::run(args),
        Commands::Stats(args) => harmonia::cli::commands::stats::run(args),
        Commands::Validate(args) => harmonia::cli::commands::validate::run(args),
    }
}
