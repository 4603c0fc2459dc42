//! Data-quality checks on the joined genome table.
//!
//! These guard the report, not the upstream pipeline: join uniqueness,
//! the classified flag agreeing with the pattern heuristic, and boring
//! species really being one-to-one.

use crate::core::classify::LabelClassifier;
use crate::core::concordance::ConcordanceTable;
use crate::core::join::GenomeRecord;
use crate::io::tables::ClusterAssignment;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub checks: Vec<CheckOutcome>,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

pub fn run_checks(
    assignments: &[ClusterAssignment],
    records: &[GenomeRecord],
    classifier: &LabelClassifier,
    table: &ConcordanceTable,
) -> QualityReport {
    QualityReport {
        checks: vec![
            check_genome_uniqueness(assignments, records),
            check_classified_flag(records, classifier),
            check_boring_one_to_one(records, table),
        ],
    }
}

/// Every genome in the clustering table appears at most once in the
/// joined table
fn check_genome_uniqueness(
    assignments: &[ClusterAssignment],
    records: &[GenomeRecord],
) -> CheckOutcome {
    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = records
        .iter()
        .filter(|r| !seen.insert(r.genome_id.as_str()))
        .map(|r| r.genome_id.as_str())
        .collect();

    let assigned: HashSet<&str> = assignments.iter().map(|a| a.genome_id.as_str()).collect();
    let joined: HashSet<&str> = records.iter().map(|r| r.genome_id.as_str()).collect();
    let stray: Vec<&&str> = joined.difference(&assigned).collect();

    let passed = duplicates.is_empty() && stray.is_empty();
    CheckOutcome {
        name: "genome uniqueness".to_string(),
        passed,
        details: if passed {
            format!("{} genomes, all unique", records.len())
        } else {
            format!(
                "{} duplicate genome ids, {} genomes not in the assignment table",
                duplicates.len(),
                stray.len()
            )
        },
    }
}

/// classified_on_ncbi is false for and only for rows whose label is
/// missing or matches the unclassified pattern set
fn check_classified_flag(records: &[GenomeRecord], classifier: &LabelClassifier) -> CheckOutcome {
    let mismatches: Vec<&str> = records
        .iter()
        .filter(|r| {
            let expected = classifier.classify(r.ncbi_label_raw.as_deref()).is_classified();
            expected != r.classified_on_ncbi
        })
        .map(|r| r.genome_id.as_str())
        .collect();

    CheckOutcome {
        name: "classified flag".to_string(),
        passed: mismatches.is_empty(),
        details: if mismatches.is_empty() {
            "flag agrees with the pattern heuristic on every row".to_string()
        } else {
            format!("{} rows disagree with the heuristic", mismatches.len())
        },
    }
}

/// A species flagged boring has exactly one distinct counterpart label
/// in each direction
fn check_boring_one_to_one(records: &[GenomeRecord], table: &ConcordanceTable) -> CheckOutcome {
    let mut ncbi_by_cni: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut cni_by_ncbi: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records {
        let (Some(cni), Some(ncbi)) =
            (record.cni_species.as_deref(), record.ncbi_species.as_deref())
        else {
            continue;
        };
        ncbi_by_cni.entry(cni).or_default().insert(ncbi);
        cni_by_ncbi.entry(ncbi).or_default().insert(cni);
    }

    let violations: Vec<&str> = table
        .species
        .iter()
        .filter(|s| s.boring)
        .filter(|s| {
            let forward = ncbi_by_cni
                .get(s.cni_species.as_str())
                .map(|set| set.len())
                .unwrap_or(0);
            let reverse = cni_by_ncbi
                .get(s.ncbi_species.as_str())
                .map(|set| set.len())
                .unwrap_or(0);
            forward != 1 || reverse != 1
        })
        .map(|s| s.cni_species.as_str())
        .collect();

    let boring = table.species.iter().filter(|s| s.boring).count();
    CheckOutcome {
        name: "boring species one-to-one".to_string(),
        passed: violations.is_empty(),
        details: if violations.is_empty() {
            format!("{} boring species, all one-to-one", boring)
        } else {
            format!(
                "{} boring species map to more than one counterpart",
                violations.len()
            )
        },
    }
}
