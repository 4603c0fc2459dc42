//! Three-way join of the input relations into one genome-level table.

use crate::core::classify::LabelClassifier;
use crate::io::tables::{ClusterAssignment, ClusterSpecies, NcbiMetadata};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One genome with both taxonomy labels attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenomeRecord {
    pub genome_id: String,
    pub cluster_id: String,
    /// Species name assigned to the genome's cluster, if any
    pub cni_species: Option<String>,
    /// Raw organism name from the assembly report
    pub ncbi_label_raw: Option<String>,
    /// Cleaned NCBI binomial, None when unclassified
    pub ncbi_species: Option<String>,
    pub classified_on_ncbi: bool,
}

/// Join the three tables, classifying each genome's NCBI label on the way.
///
/// Join-key uniqueness is the only enforced invariant: a duplicate
/// genome_id or cluster_id in its keyed table is a hard error. Missing
/// keys join as None (a genome without metadata is NCBI-unclassified).
pub fn join_tables(
    assignments: &[ClusterAssignment],
    clusters: &[ClusterSpecies],
    metadata: &[NcbiMetadata],
    classifier: &LabelClassifier,
) -> crate::Result<Vec<GenomeRecord>> {
    let species_by_cluster = unique_index(
        clusters.iter().map(|c| (&c.cluster_id, &c.species_name)),
        "cluster_id",
        "cluster_species_name",
    )?;
    let label_by_genome = unique_index(
        metadata.iter().map(|m| (&m.genome_id, &m.ncbi_species_label)),
        "genome_id",
        "genome_ncbi_metadata",
    )?;

    let mut seen_genomes: HashSet<&str> = HashSet::with_capacity(assignments.len());
    let mut records = Vec::with_capacity(assignments.len());

    for assignment in assignments {
        if !seen_genomes.insert(assignment.genome_id.as_str()) {
            return Err(crate::HarmoniaError::Table(format!(
                "Duplicate genome_id '{}' in genome_cluster_assignment",
                assignment.genome_id
            )));
        }

        let cni_species = species_by_cluster
            .get(assignment.cluster_id.as_str())
            .map(|s| (*s).clone());
        let ncbi_label_raw = label_by_genome
            .get(assignment.genome_id.as_str())
            .and_then(|l| (*l).clone());

        let classification = classifier.classify(ncbi_label_raw.as_deref());
        let ncbi_species = classification.species().map(|s| s.to_string());

        records.push(GenomeRecord {
            genome_id: assignment.genome_id.clone(),
            cluster_id: assignment.cluster_id.clone(),
            cni_species,
            classified_on_ncbi: ncbi_species.is_some(),
            ncbi_label_raw,
            ncbi_species,
        });
    }

    tracing::info!(
        genomes = records.len(),
        classified = records.iter().filter(|r| r.classified_on_ncbi).count(),
        "joined input tables"
    );
    Ok(records)
}

fn unique_index<'a, K, V, I>(
    pairs: I,
    key_name: &str,
    table_name: &str,
) -> crate::Result<HashMap<&'a str, &'a V>>
where
    K: AsRef<str> + 'a + ?Sized,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut index = HashMap::new();
    for (key, value) in pairs {
        if index.insert(key.as_ref(), value).is_some() {
            return Err(crate::HarmoniaError::Table(format!(
                "Duplicate {} '{}' in {}",
                key_name,
                key.as_ref(),
                table_name
            )));
        }
    }
    Ok(index)
}
