use crate::cli::commands::{load_inputs, InputArgs};
use crate::cli::formatter::{format_number, section_header};
use crate::core::paths;
use crate::io::tables::write_csv;
use crate::plot::bars::render_reassignment_chart;
use crate::plot::compose::{render_composed_figure, FigureOptions};
use crate::plot::scatter::render_reclassification_chart;
use crate::report::{Format, ReportGenerator, ReportOptions, SummaryReport};
use clap::Args;
use colored::*;
use std::path::PathBuf;

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory (default: HARMONIA_OUTPUT_DIR or ./output)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Summary report format (text, json, csv)
    #[arg(long)]
    pub format: Option<String>,

    /// Number of species shown in the reassignment bar chart
    #[arg(long)]
    pub top: Option<usize>,

    /// Skip the per-species concordance table in the summary
    #[arg(long)]
    pub no_details: bool,
}

pub fn run(args: ReportArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let config = &inputs.config;

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output.output_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(paths::harmonia_output_dir);
    let plots_dir = output_dir.join("plots");
    let figures_dir = output_dir.join("figures");
    std::fs::create_dir_all(&plots_dir)?;
    std::fs::create_dir_all(&figures_dir)?;

    let top = args.top.unwrap_or(config.charts.top_reassignments);
    let table = &inputs.table;

    // Diagnostic charts
    render_reassignment_chart(
        plots_dir.join("reassignments.png"),
        &table.reassignments,
        top,
        config.charts.panel_width,
        config.charts.panel_height,
    )?;
    render_reclassification_chart(
        plots_dir.join("reclassifications.png"),
        &table.reclassifications,
        config.charts.panel_width,
        config.charts.panel_height,
    )?;

    // Composed publication figure
    let options = FigureOptions {
        panel_width: config.charts.panel_width,
        panel_height: config.charts.panel_height,
        top_reassignments: top,
    };
    let (png, svg) = render_composed_figure(&figures_dir, table, &options)?;

    // Derived tables and the summary report
    write_csv(output_dir.join("species_concordance.csv"), &table.species)?;
    write_csv(output_dir.join("reassignments.csv"), &table.reassignments)?;
    write_csv(
        output_dir.join("reclassifications.csv"),
        &table.reclassifications,
    )?;

    let format: Format = args
        .format
        .as_deref()
        .unwrap_or(&config.output.report_format)
        .parse()
        .map_err(crate::HarmoniaError::Config)?;
    let extension = match format {
        Format::Text => "txt",
        Format::Json => "json",
        Format::Csv => "csv",
    };
    let summary = SummaryReport::build(&inputs.records, table);
    let generator = ReportGenerator::new(ReportOptions {
        format,
        include_details: !args.no_details,
    });
    let report_path = output_dir.join(format!("summary.{}", extension));
    std::fs::write(&report_path, generator.generate(&summary)?)?;

    section_header("Concordance analysis complete");
    println!(
        "  {} genomes ({} NCBI-classified, {} unclassified)",
        format_number(summary.total_genomes),
        format_number(summary.classified_genomes),
        format_number(summary.unclassified_genomes)
    );
    println!(
        "  {} boring species excluded, {} genomes in the reclassification chart",
        format_number(summary.boring_species),
        format_number(summary.interesting_genomes)
    );
    println!("  {} {}", "Figure:".green().bold(), png.display());
    println!("  {} {}", "Vector:".green().bold(), svg.display());
    println!("  {} {}", "Report:".green().bold(), report_path.display());

    Ok(())
}
