//! Cross-taxonomy concordance scoring.
//!
//! For every species name in one taxonomy, the genomes sharing that name
//! are tallied by their label in the *other* taxonomy, and the inverse
//! Simpson index of that tally measures how many distinct counterpart
//! labels the name effectively maps to. A pair of names with diversity 1
//! in both directions is a perfect one-to-one correspondence ("boring")
//! and carries no reclassification signal.

use crate::core::join::GenomeRecord;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const UNITY_EPSILON: f64 = 1e-9;

/// Concordance scores for one CNI species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesConcordance {
    pub cni_species: String,
    /// Most frequent NCBI counterpart of this CNI species
    pub ncbi_species: String,
    /// Classified genomes carrying this CNI species
    pub genomes: usize,
    /// Inverse Simpson over NCBI labels within this CNI species
    pub cni_to_ncbi_diversity: f64,
    /// Inverse Simpson over CNI labels within the modal NCBI counterpart
    pub ncbi_to_cni_diversity: f64,
    /// Perfect one-to-one correspondence in both directions
    pub boring: bool,
}

/// A CNI species that absorbed NCBI-unclassified genomes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReassignmentCount {
    pub cni_species: String,
    pub genomes: usize,
}

/// One (CNI species, NCBI species) cell of the reclassification chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reclassification {
    pub cni_species: String,
    pub ncbi_species: String,
    pub genomes: usize,
}

/// Per-species concordance plus the two derived chart tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcordanceTable {
    pub species: Vec<SpeciesConcordance>,
    pub reassignments: Vec<ReassignmentCount>,
    pub reclassifications: Vec<Reclassification>,
}

/// Inverse Simpson index: 1 / Σ pᵢ². Returns 0.0 for an empty tally.
pub fn inverse_simpson(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let sum_p2: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum();
    1.0 / sum_p2
}

impl ConcordanceTable {
    /// Score every species pair in the joined genome table.
    ///
    /// Only genomes carrying both a CNI species and a cleaned NCBI
    /// binomial contribute to diversity; unclassified genomes feed the
    /// reassignment tally instead.
    pub fn from_records(records: &[GenomeRecord]) -> Self {
        // Counterpart tallies in both directions, insertion-ordered so
        // chart output is deterministic across runs
        let mut ncbi_by_cni: IndexMap<&str, HashMap<&str, usize>> = IndexMap::new();
        let mut cni_by_ncbi: HashMap<&str, HashMap<&str, usize>> = HashMap::new();

        for record in records {
            let (Some(cni), Some(ncbi)) =
                (record.cni_species.as_deref(), record.ncbi_species.as_deref())
            else {
                continue;
            };
            *ncbi_by_cni.entry(cni).or_default().entry(ncbi).or_insert(0) += 1;
            *cni_by_ncbi.entry(ncbi).or_default().entry(cni).or_insert(0) += 1;
        }

        let ncbi_diversity: HashMap<&str, f64> = cni_by_ncbi
            .par_iter()
            .map(|(ncbi, tally)| {
                let counts: Vec<usize> = tally.values().copied().collect();
                (*ncbi, inverse_simpson(&counts))
            })
            .collect();

        let mut species: Vec<SpeciesConcordance> = ncbi_by_cni
            .par_iter()
            .map(|(cni, tally)| {
                let counts: Vec<usize> = tally.values().copied().collect();
                let cni_to_ncbi = inverse_simpson(&counts);

                // Modal counterpart; ties break lexicographically
                let (modal_ncbi, _) = tally
                    .iter()
                    .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                    .expect("tally is non-empty by construction");
                let ncbi_to_cni = ncbi_diversity.get(modal_ncbi).copied().unwrap_or(0.0);

                let boring = (cni_to_ncbi - 1.0).abs() < UNITY_EPSILON
                    && (ncbi_to_cni - 1.0).abs() < UNITY_EPSILON;

                SpeciesConcordance {
                    cni_species: cni.to_string(),
                    ncbi_species: modal_ncbi.to_string(),
                    genomes: tally.values().sum(),
                    cni_to_ncbi_diversity: cni_to_ncbi,
                    ncbi_to_cni_diversity: ncbi_to_cni,
                    boring,
                }
            })
            .collect();
        species.sort_by(|a, b| {
            b.genomes
                .cmp(&a.genomes)
                .then_with(|| a.cni_species.cmp(&b.cni_species))
        });

        let boring_cni: HashMap<&str, bool> = species
            .iter()
            .map(|s| (s.cni_species.as_str(), s.boring))
            .collect();

        let reassignments = tally_reassignments(records);
        let reclassifications = tally_reclassifications(records, &boring_cni);

        ConcordanceTable {
            species,
            reassignments,
            reclassifications,
        }
    }

    pub fn boring_species(&self) -> usize {
        self.species.iter().filter(|s| s.boring).count()
    }

    /// Genomes that appear in the reclassification chart
    pub fn interesting_genomes(&self) -> usize {
        self.reclassifications.iter().map(|r| r.genomes).sum()
    }
}

/// Tally NCBI-unclassified genomes by the CNI species that absorbed them,
/// descending by count then by name
fn tally_reassignments(records: &[GenomeRecord]) -> Vec<ReassignmentCount> {
    let mut tally: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        if record.classified_on_ncbi {
            continue;
        }
        let Some(cni) = record.cni_species.as_deref() else {
            continue;
        };
        *tally.entry(cni).or_insert(0) += 1;
    }

    let mut counts: Vec<ReassignmentCount> = tally
        .into_iter()
        .map(|(cni_species, genomes)| ReassignmentCount {
            cni_species: cni_species.to_string(),
            genomes,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.genomes
            .cmp(&a.genomes)
            .then_with(|| a.cni_species.cmp(&b.cni_species))
    });
    counts
}

/// Tally classified genomes in non-boring species pairs by
/// (CNI species, NCBI species)
fn tally_reclassifications(
    records: &[GenomeRecord],
    boring_cni: &HashMap<&str, bool>,
) -> Vec<Reclassification> {
    let mut tally: IndexMap<(&str, &str), usize> = IndexMap::new();
    for record in records {
        let (Some(cni), Some(ncbi)) =
            (record.cni_species.as_deref(), record.ncbi_species.as_deref())
        else {
            continue;
        };
        if boring_cni.get(cni).copied().unwrap_or(false) {
            continue;
        }
        *tally.entry((cni, ncbi)).or_insert(0) += 1;
    }

    let mut cells: Vec<Reclassification> = tally
        .into_iter()
        .map(|((cni, ncbi), genomes)| Reclassification {
            cni_species: cni.to_string(),
            ncbi_species: ncbi.to_string(),
            genomes,
        })
        .collect();
    cells.sort_by(|a, b| {
        b.genomes
            .cmp(&a.genomes)
            .then_with(|| a.cni_species.cmp(&b.cni_species))
            .then_with(|| a.ncbi_species.cmp(&b.ncbi_species))
    });
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(
        genome: &str,
        cni: Option<&str>,
        ncbi: Option<&str>,
    ) -> GenomeRecord {
        GenomeRecord {
            genome_id: genome.to_string(),
            cluster_id: format!("cluster_of_{}", genome),
            cni_species: cni.map(|s| s.to_string()),
            ncbi_label_raw: ncbi.map(|s| s.to_string()),
            ncbi_species: ncbi.map(|s| s.to_string()),
            classified_on_ncbi: ncbi.is_some(),
        }
    }

    #[test]
    fn inverse_simpson_of_single_label_is_one() {
        assert!((inverse_simpson(&[7]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_simpson_of_uniform_tally_equals_label_count() {
        assert!((inverse_simpson(&[5, 5, 5]) - 3.0).abs() < 1e-9);
        assert!((inverse_simpson(&[2, 2]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_simpson_of_skewed_tally_is_between_one_and_count() {
        let d = inverse_simpson(&[9, 1]);
        assert!(d > 1.0 && d < 2.0);
    }

    #[test]
    fn inverse_simpson_of_empty_tally_is_zero() {
        assert_eq!(inverse_simpson(&[]), 0.0);
        assert_eq!(inverse_simpson(&[0, 0]), 0.0);
    }

    #[test]
    fn one_to_one_species_pair_is_boring() {
        let records = vec![
            record("G1", Some("Escherichia coli"), Some("Escherichia coli")),
            record("G2", Some("Escherichia coli"), Some("Escherichia coli")),
        ];
        let table = ConcordanceTable::from_records(&records);
        assert_eq!(table.species.len(), 1);
        assert!(table.species[0].boring);
        assert_eq!(table.boring_species(), 1);
        // Boring pairs are excluded from the scatter
        assert!(table.reclassifications.is_empty());
        assert_eq!(table.interesting_genomes(), 0);
    }

    #[test]
    fn split_cluster_is_not_boring() {
        // One CNI species spanning two NCBI species: forward diversity 2
        let records = vec![
            record("G1", Some("novel_3"), Some("Escherichia coli")),
            record("G2", Some("novel_3"), Some("Shigella flexneri")),
        ];
        let table = ConcordanceTable::from_records(&records);
        assert_eq!(table.species.len(), 1);
        let s = &table.species[0];
        assert!((s.cni_to_ncbi_diversity - 2.0).abs() < 1e-9);
        assert!(!s.boring);
        assert_eq!(table.reclassifications.len(), 2);
    }

    #[test]
    fn merged_ncbi_species_is_not_boring_in_reverse() {
        // Two CNI species both map to the same NCBI name: each forward
        // diversity is 1, but the reverse direction is 2
        let records = vec![
            record("G1", Some("novel_1"), Some("Bacillus subtilis")),
            record("G2", Some("novel_2"), Some("Bacillus subtilis")),
        ];
        let table = ConcordanceTable::from_records(&records);
        for s in &table.species {
            assert!((s.cni_to_ncbi_diversity - 1.0).abs() < 1e-9);
            assert!((s.ncbi_to_cni_diversity - 2.0).abs() < 1e-9);
            assert!(!s.boring);
        }
        assert_eq!(table.reclassifications.len(), 2);
    }

    #[test]
    fn unclassified_genomes_feed_the_reassignment_tally() {
        let records = vec![
            record("G1", Some("novel_1"), None),
            record("G2", Some("novel_1"), None),
            record("G3", Some("novel_2"), None),
            record("G4", None, None),
        ];
        let table = ConcordanceTable::from_records(&records);
        assert_eq!(
            table.reassignments,
            vec![
                ReassignmentCount {
                    cni_species: "novel_1".to_string(),
                    genomes: 2,
                },
                ReassignmentCount {
                    cni_species: "novel_2".to_string(),
                    genomes: 1,
                },
            ]
        );
        // No classified genome, no concordance rows
        assert!(table.species.is_empty());
    }

    #[test]
    fn reassignments_sort_by_count_then_name() {
        let records = vec![
            record("G1", Some("zeta"), None),
            record("G2", Some("alpha"), None),
            record("G3", Some("alpha"), None),
            record("G4", Some("beta"), None),
        ];
        let table = ConcordanceTable::from_records(&records);
        let names: Vec<&str> = table
            .reassignments
            .iter()
            .map(|r| r.cni_species.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn mixed_table_separates_boring_from_interesting() {
        let records = vec![
            // Boring pair
            record("G1", Some("Lactobacillus gasseri"), Some("Lactobacillus gasseri")),
            record("G2", Some("Lactobacillus gasseri"), Some("Lactobacillus gasseri")),
            // Split CNI cluster
            record("G3", Some("novel_9"), Some("Klebsiella pneumoniae")),
            record("G4", Some("novel_9"), Some("Klebsiella variicola")),
            // Unclassified genome absorbed by the split cluster
            record("G5", Some("novel_9"), None),
        ];
        let table = ConcordanceTable::from_records(&records);
        assert_eq!(table.species.len(), 2);
        assert_eq!(table.boring_species(), 1);
        assert_eq!(table.interesting_genomes(), 2);
        assert_eq!(table.reassignments.len(), 1);
        assert_eq!(table.reassignments[0].genomes, 1);
    }
}
