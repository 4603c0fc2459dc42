//! Bubble chart of reclassifications: CNI species against NCBI species,
//! bubble area proportional to the number of genomes in the cell. Boring
//! one-to-one pairs are filtered out upstream, so every bubble here is a
//! genuine disagreement between the taxonomies.

use crate::core::concordance::Reclassification;
use crate::plot::{plot_err, short_label};
use indexmap::IndexSet;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;

const BUBBLE_COLOR: RGBColor = RGBColor(214, 39, 40);
const MIN_RADIUS: f64 = 3.0;
const MAX_RADIUS: f64 = 14.0;

/// Render the standalone diagnostic PNG
pub fn render_reclassification_chart<P: AsRef<Path>>(
    path: P,
    cells: &[Reclassification],
    width: u32,
    height: u32,
) -> crate::Result<()> {
    let root = BitMapBackend::new(path.as_ref(), (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    draw_reclassification_panel(&root, cells)?;
    root.present().map_err(plot_err)?;
    tracing::info!(path = %path.as_ref().display(), "wrote reclassification bubble chart");
    Ok(())
}

/// Draw the panel onto any backend (shared with the composed figure)
pub fn draw_reclassification_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    cells: &[Reclassification],
) -> crate::Result<()> {
    if cells.is_empty() {
        area.draw(&Text::new(
            "No reclassified genomes (all species pairs concordant)",
            (40, 40),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(plot_err)?;
        return Ok(());
    }

    // Axis categories in table order (already sorted by genome count)
    let ncbi_names: IndexSet<&str> = cells.iter().map(|c| c.ncbi_species.as_str()).collect();
    let cni_names: IndexSet<&str> = cells.iter().map(|c| c.cni_species.as_str()).collect();
    let max_genomes = cells.iter().map(|c| c.genomes).max().unwrap_or(1);

    let x_labels: Vec<String> = ncbi_names.iter().map(|n| short_label(n, 22)).collect();
    let y_labels: Vec<String> = cni_names.iter().map(|n| short_label(n, 26)).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Reclassifications between taxonomies", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(150)
        .y_label_area_size(200)
        .build_cartesian_2d(
            -0.5f64..ncbi_names.len() as f64 - 0.5,
            -0.5f64..cni_names.len() as f64 - 0.5,
        )
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("NCBI species")
        .y_desc("CNI species")
        .x_labels(ncbi_names.len())
        .y_labels(cni_names.len())
        .x_label_formatter(&|v| nearest_label(*v, &x_labels))
        .y_label_formatter(&|v| nearest_label(*v, &y_labels))
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(cells.iter().map(|cell| {
            let x = ncbi_names.get_index_of(cell.ncbi_species.as_str()).unwrap() as f64;
            let y = cni_names.get_index_of(cell.cni_species.as_str()).unwrap() as f64;
            Circle::new(
                (x, y),
                bubble_radius(cell.genomes, max_genomes),
                BUBBLE_COLOR.mix(0.6).filled(),
            )
        }))
        .map_err(plot_err)?;

    Ok(())
}

/// Bubble area scales with genome count, so the radius uses a square root
fn bubble_radius(genomes: usize, max_genomes: usize) -> i32 {
    let scale = (genomes as f64 / max_genomes as f64).sqrt();
    (MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * scale).round() as i32
}

fn nearest_label(value: f64, labels: &[String]) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> Vec<Reclassification> {
        vec![
            Reclassification {
                cni_species: "novel_3".to_string(),
                ncbi_species: "Escherichia coli".to_string(),
                genomes: 9,
            },
            Reclassification {
                cni_species: "novel_3".to_string(),
                ncbi_species: "Shigella flexneri".to_string(),
                genomes: 3,
            },
            Reclassification {
                cni_species: "novel_8".to_string(),
                ncbi_species: "Escherichia coli".to_string(),
                genomes: 1,
            },
        ]
    }

    #[test]
    fn renders_a_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reclassifications.png");
        render_reclassification_chart(&path, &cells(), 900, 600).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn largest_cell_gets_the_largest_bubble() {
        assert_eq!(bubble_radius(9, 9), MAX_RADIUS as i32);
        assert!(bubble_radius(1, 9) < bubble_radius(9, 9));
        assert!(bubble_radius(1, 9) >= MIN_RADIUS as i32);
    }

    #[test]
    fn empty_input_still_produces_a_valid_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        render_reclassification_chart(&path, &[], 400, 300).unwrap();
        assert!(path.exists());
    }
}
