use crate::cli::charts::AsciiBarChart;
use crate::cli::commands::{load_inputs, InputArgs};
use crate::cli::formatter::{format_number, print_stats_table, section_header};
use crate::core::concordance::ConcordanceTable;
use crate::core::join::GenomeRecord;
use crate::report::SummaryReport;
use clap::Args;
use colored::*;

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show ASCII charts alongside the tables
    #[arg(long)]
    pub visual: bool,

    /// Show the per-species concordance table
    #[arg(long)]
    pub detailed: bool,
}

pub fn run(args: StatsArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let records = &inputs.records;
    let table = &inputs.table;
    let summary = SummaryReport::build(records, table);

    print_stats_table("Genome Table", genome_rows(records, &summary));
    print_stats_table("Concordance", concordance_rows(table, &summary));

    if args.visual && !table.reassignments.is_empty() {
        let mut chart = AsciiBarChart::new("Reassignments of NCBI-unclassified genomes");
        for r in table.reassignments.iter().take(15) {
            chart.add_bar(&r.cni_species, r.genomes);
        }
        println!("{}", chart.render());
    }

    if args.detailed && !table.species.is_empty() {
        section_header("Per-species concordance");
        for s in &table.species {
            let marker = if s.boring {
                "boring".dimmed()
            } else {
                "interesting".yellow()
            };
            println!(
                "  {:30} -> {:30} {:>5} genomes  D {:.2}/{:.2}  [{}]",
                s.cni_species,
                s.ncbi_species,
                s.genomes,
                s.cni_to_ncbi_diversity,
                s.ncbi_to_cni_diversity,
                marker
            );
        }
    }

    Ok(())
}

fn genome_rows(records: &[GenomeRecord], summary: &SummaryReport) -> Vec<(&'static str, String)> {
    vec![
        ("Genomes", format_number(summary.total_genomes)),
        ("NCBI-classified", format_number(summary.classified_genomes)),
        (
            "NCBI-unclassified",
            format_number(summary.unclassified_genomes),
        ),
        (
            "Clusters without species name",
            format_number(records.iter().filter(|r| r.cni_species.is_none()).count()),
        ),
    ]
}

/// Species counts on both sides: the distinct-name counts cover every
/// genome, while "scored" is limited to CNI species with at least one
/// classified genome
fn concordance_rows(
    table: &ConcordanceTable,
    summary: &SummaryReport,
) -> Vec<(&'static str, String)> {
    vec![
        ("CNI species", format_number(summary.cni_species)),
        ("NCBI species", format_number(summary.ncbi_species)),
        ("Scored CNI species", format_number(table.species.len())),
        ("Boring (one-to-one)", format_number(table.boring_species())),
        (
            "Reclassified genomes",
            format_number(table.interesting_genomes()),
        ),
        (
            "Reassignment targets",
            format_number(table.reassignments.len()),
        ),
    ]
}
