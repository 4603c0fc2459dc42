//! Two-panel publication figure: reassignment bars on top, the
//! reclassification bubble chart below, exported as PNG and as
//! print-ready SVG.

use crate::core::concordance::ConcordanceTable;
use crate::plot::bars::draw_reassignment_panel;
use crate::plot::plot_err;
use crate::plot::scatter::draw_reclassification_panel;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::{Path, PathBuf};

pub struct FigureOptions {
    pub panel_width: u32,
    pub panel_height: u32,
    pub top_reassignments: usize,
}

/// Render `figure.png` and `figure.svg` into `dir`, returning both paths
pub fn render_composed_figure(
    dir: &Path,
    table: &ConcordanceTable,
    options: &FigureOptions,
) -> crate::Result<(PathBuf, PathBuf)> {
    let size = (options.panel_width, options.panel_height * 2);

    let png_path = dir.join("figure.png");
    {
        let root = BitMapBackend::new(&png_path, size).into_drawing_area();
        compose(&root, table, options)?;
        root.present().map_err(plot_err)?;
    }

    let svg_path = dir.join("figure.svg");
    {
        let root = SVGBackend::new(&svg_path, size).into_drawing_area();
        compose(&root, table, options)?;
        root.present().map_err(plot_err)?;
    }

    tracing::info!(
        png = %png_path.display(),
        svg = %svg_path.display(),
        "wrote composed figure"
    );
    Ok((png_path, svg_path))
}

fn compose<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &ConcordanceTable,
    options: &FigureOptions,
) -> crate::Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;
    let (upper, lower) = root.split_vertically(options.panel_height);

    draw_panel_letter(&upper, "a")?;
    draw_reassignment_panel(&upper, &table.reassignments, options.top_reassignments)?;

    draw_panel_letter(&lower, "b")?;
    draw_reclassification_panel(&lower, &table.reclassifications)?;

    Ok(())
}

fn draw_panel_letter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    letter: &str,
) -> crate::Result<()> {
    area.draw(&Text::new(
        letter.to_string(),
        (8, 8),
        FontDesc::new(FontFamily::SansSerif, 26.0, FontStyle::Bold).color(&BLACK),
    ))
    .map_err(plot_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::concordance::{ReassignmentCount, Reclassification, SpeciesConcordance};

    fn table() -> ConcordanceTable {
        ConcordanceTable {
            species: vec![SpeciesConcordance {
                cni_species: "novel_3".to_string(),
                ncbi_species: "Escherichia coli".to_string(),
                genomes: 4,
                cni_to_ncbi_diversity: 1.6,
                ncbi_to_cni_diversity: 1.0,
                boring: false,
            }],
            reassignments: vec![ReassignmentCount {
                cni_species: "novel_3".to_string(),
                genomes: 2,
            }],
            reclassifications: vec![Reclassification {
                cni_species: "novel_3".to_string(),
                ncbi_species: "Escherichia coli".to_string(),
                genomes: 4,
            }],
        }
    }

    #[test]
    fn writes_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let options = FigureOptions {
            panel_width: 800,
            panel_height: 400,
            top_reassignments: 20,
        };
        let (png, svg) = render_composed_figure(dir.path(), &table(), &options).unwrap();
        assert!(png.exists());
        assert!(svg.exists());
        let svg_text = std::fs::read_to_string(&svg).unwrap();
        assert!(svg_text.contains("<svg"));
    }
}
