//! Typed CSV loaders for the three input relations.
//!
//! All three tables are read wholesale into memory; the metadata table
//! may carry arbitrary extra assembly-report columns, which serde skips.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the genome -> cluster assignment table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterAssignment {
    pub genome_id: String,
    pub cluster_id: String,
}

/// One row of the cluster -> assigned species name table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterSpecies {
    pub cluster_id: String,
    pub species_name: String,
}

/// One row of the genome -> NCBI assembly metadata table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NcbiMetadata {
    pub genome_id: String,
    /// Organism name from the assembly report; empty fields become None
    pub ncbi_species_label: Option<String>,
}

pub fn load_assignments<P: AsRef<Path>>(path: P) -> crate::Result<Vec<ClusterAssignment>> {
    load_table(path)
}

pub fn load_cluster_species<P: AsRef<Path>>(path: P) -> crate::Result<Vec<ClusterSpecies>> {
    load_table(path)
}

pub fn load_metadata<P: AsRef<Path>>(path: P) -> crate::Result<Vec<NcbiMetadata>> {
    load_table(path)
}

fn load_table<P: AsRef<Path>, T: serde::de::DeserializeOwned>(path: P) -> crate::Result<Vec<T>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            crate::HarmoniaError::Table(format!("Cannot open {}: {}", path.display(), e))
        })?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    tracing::debug!(rows = rows.len(), path = %path.display(), "loaded table");
    Ok(rows)
}

/// Write any serializable row set as CSV (used for derived-table exports)
pub fn write_csv<P: AsRef<Path>, T: Serialize>(path: P, rows: &[T]) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_assignment_rows() {
        let file = write_temp("genome_id,cluster_id\nG1,C1\nG2,C1\n");
        let rows = load_assignments(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].genome_id, "G1");
        assert_eq!(rows[1].cluster_id, "C1");
    }

    #[test]
    fn metadata_ignores_extra_assembly_report_columns() {
        let file = write_temp(
            "genome_id,ncbi_species_label,assembly_level,submitter\n\
             G1,Escherichia coli K-12,Complete Genome,JGI\n\
             G2,,Contig,JGI\n",
        );
        let rows = load_metadata(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].ncbi_species_label.as_deref(),
            Some("Escherichia coli K-12")
        );
        assert_eq!(rows[1].ncbi_species_label, None);
    }

    #[test]
    fn missing_file_is_a_table_error() {
        let err = load_assignments("/nonexistent/assignments.csv").unwrap_err();
        assert!(matches!(err, crate::HarmoniaError::Table(_)));
    }

    #[test]
    fn csv_round_trip_for_derived_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            ClusterSpecies {
                cluster_id: "C1".into(),
                species_name: "Escherichia coli".into(),
            },
            ClusterSpecies {
                cluster_id: "C2".into(),
                species_name: "Bacillus subtilis".into(),
            },
        ];
        write_csv(&path, &rows).unwrap();
        let back = load_cluster_species(&path).unwrap();
        assert_eq!(back, rows);
    }
}
