pub mod cli;
pub mod core;
pub mod io;
pub mod plot;
pub mod report;

pub use crate::core::concordance::ConcordanceTable;
pub use crate::core::join::GenomeRecord;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarmoniaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Input table error: {0}")]
    Table(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HarmoniaError>;
