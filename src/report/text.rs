use crate::report::{ReportOptions, SummaryReport};
use anyhow::Result;
use std::fmt::Write;

pub fn generate_text_report(report: &SummaryReport, options: &ReportOptions) -> Result<String> {
    let mut output = String::new();

    writeln!(&mut output, "Taxonomy Concordance Report")?;
    writeln!(&mut output, "===========================")?;
    writeln!(
        &mut output,
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(&mut output)?;

    writeln!(&mut output, "Summary")?;
    writeln!(&mut output, "-------")?;
    writeln!(
        &mut output,
        "- Genomes:             {:6}",
        report.total_genomes
    )?;
    writeln!(
        &mut output,
        "- NCBI-classified:     {:6}",
        report.classified_genomes
    )?;
    writeln!(
        &mut output,
        "- NCBI-unclassified:   {:6}",
        report.unclassified_genomes
    )?;
    writeln!(
        &mut output,
        "- CNI species:         {:6}",
        report.cni_species
    )?;
    writeln!(
        &mut output,
        "- NCBI species:        {:6}",
        report.ncbi_species
    )?;
    writeln!(
        &mut output,
        "- Boring species:      {:6}",
        report.boring_species
    )?;
    writeln!(
        &mut output,
        "- Reclassified genomes:{:6}",
        report.interesting_genomes
    )?;
    writeln!(&mut output)?;

    if !report.reassignments.is_empty() {
        writeln!(&mut output, "Reassignments of NCBI-unclassified genomes")?;
        writeln!(&mut output, "-------------------------------------------")?;
        for r in &report.reassignments {
            writeln!(&mut output, "{:40} {:6}", r.cni_species, r.genomes)?;
        }
        writeln!(&mut output)?;
    }

    if options.include_details && !report.species.is_empty() {
        writeln!(&mut output, "Per-species concordance")?;
        writeln!(&mut output, "-----------------------")?;
        writeln!(
            &mut output,
            "{:30} {:30} {:>7} {:>8} {:>8} {:>7}",
            "CNI species", "NCBI species", "genomes", "D(c->n)", "D(n->c)", "boring"
        )?;
        for s in &report.species {
            writeln!(
                &mut output,
                "{:30} {:30} {:>7} {:>8.3} {:>8.3} {:>7}",
                s.cni_species,
                s.ncbi_species,
                s.genomes,
                s.cni_to_ncbi_diversity,
                s.ncbi_to_cni_diversity,
                if s.boring { "yes" } else { "no" }
            )?;
        }
    }

    Ok(output)
}
