//! Horizontal bar chart of unclassified-genome reassignments: which CNI
//! species absorbed the genomes NCBI could not name.

use crate::core::concordance::ReassignmentCount;
use crate::plot::{plot_err, short_label};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Render the standalone diagnostic PNG
pub fn render_reassignment_chart<P: AsRef<Path>>(
    path: P,
    counts: &[ReassignmentCount],
    top: usize,
    width: u32,
    height: u32,
) -> crate::Result<()> {
    let root = BitMapBackend::new(path.as_ref(), (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    draw_reassignment_panel(&root, counts, top)?;
    root.present().map_err(plot_err)?;
    tracing::info!(path = %path.as_ref().display(), "wrote reassignment bar chart");
    Ok(())
}

/// Draw the panel onto any backend (shared with the composed figure)
pub fn draw_reassignment_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    counts: &[ReassignmentCount],
    top: usize,
) -> crate::Result<()> {
    let shown: Vec<&ReassignmentCount> = counts.iter().take(top).collect();
    if shown.is_empty() {
        area.draw(&Text::new(
            "No NCBI-unclassified genomes",
            (40, 40),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(plot_err)?;
        return Ok(());
    }

    let max_count = shown.iter().map(|c| c.genomes).max().unwrap_or(1);
    let labels: Vec<String> = shown
        .iter()
        .map(|c| short_label(&c.cni_species, 28))
        .collect();

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Reassignment of NCBI-unclassified genomes",
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(210)
        .build_cartesian_2d(0usize..max_count + 1, (0..shown.len()).into_segmented())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Genomes")
        .y_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_labels(shown.len())
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(shown.iter().enumerate().map(|(i, c)| {
            Rectangle::new(
                [
                    (0, SegmentValue::Exact(i)),
                    (c.genomes, SegmentValue::Exact(i + 1)),
                ],
                BAR_COLOR.mix(0.8).filled(),
            )
        }))
        .map_err(plot_err)?;

    Ok(())
}
