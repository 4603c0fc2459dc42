use crate::core::concordance::{
    ConcordanceTable, ReassignmentCount, Reclassification, SpeciesConcordance,
};
use crate::core::join::GenomeRecord;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod json;
pub mod text;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: Format,
    /// Include the full per-species concordance table
    pub include_details: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Serializable snapshot of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub total_genomes: usize,
    pub classified_genomes: usize,
    pub unclassified_genomes: usize,
    pub cni_species: usize,
    pub ncbi_species: usize,
    pub boring_species: usize,
    pub interesting_genomes: usize,
    pub species: Vec<SpeciesConcordance>,
    pub reassignments: Vec<ReassignmentCount>,
    pub reclassifications: Vec<Reclassification>,
}

impl SummaryReport {
    pub fn build(records: &[GenomeRecord], table: &ConcordanceTable) -> Self {
        let cni_species: HashSet<&str> = records
            .iter()
            .filter_map(|r| r.cni_species.as_deref())
            .collect();
        let ncbi_species: HashSet<&str> = records
            .iter()
            .filter_map(|r| r.ncbi_species.as_deref())
            .collect();
        let classified = records.iter().filter(|r| r.classified_on_ncbi).count();

        SummaryReport {
            generated_at: Utc::now(),
            total_genomes: records.len(),
            classified_genomes: classified,
            unclassified_genomes: records.len() - classified,
            cni_species: cni_species.len(),
            ncbi_species: ncbi_species.len(),
            boring_species: table.boring_species(),
            interesting_genomes: table.interesting_genomes(),
            species: table.species.clone(),
            reassignments: table.reassignments.clone(),
            reclassifications: table.reclassifications.clone(),
        }
    }
}

pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self, report: &SummaryReport) -> Result<String> {
        match self.options.format {
            Format::Text => text::generate_text_report(report, &self.options),
            Format::Json => json::generate_json_report(report),
            Format::Csv => self.generate_csv_report(report),
        }
    }

    fn generate_csv_report(&self, report: &SummaryReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &report.species {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV report: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SummaryReport {
        SummaryReport {
            generated_at: Utc::now(),
            total_genomes: 5,
            classified_genomes: 4,
            unclassified_genomes: 1,
            cni_species: 2,
            ncbi_species: 3,
            boring_species: 1,
            interesting_genomes: 2,
            species: vec![SpeciesConcordance {
                cni_species: "novel_9".to_string(),
                ncbi_species: "Klebsiella pneumoniae".to_string(),
                genomes: 2,
                cni_to_ncbi_diversity: 2.0,
                ncbi_to_cni_diversity: 1.0,
                boring: false,
            }],
            reassignments: vec![],
            reclassifications: vec![],
        }
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("TEXT".parse::<Format>().unwrap(), Format::Text);
        assert_eq!("Json".parse::<Format>().unwrap(), Format::Json);
        assert!("tiff".parse::<Format>().is_err());
    }

    #[test]
    fn csv_report_has_one_row_per_species() {
        let generator = ReportGenerator::new(ReportOptions {
            format: Format::Csv,
            include_details: true,
        });
        let out = generator.generate(&sample_report()).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().contains("cni_species"));
        assert!(lines.next().unwrap().contains("novel_9"));
        assert_eq!(lines.next(), None);
    }
}
