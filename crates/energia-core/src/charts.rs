//! Four-panel PNG summarising the scored table.
//!
//! [`ChartData`] holds everything the panels plot, already extracted from the frame, so
//! the drawing code only maps points to shapes.

use std::ops::Range;
use std::path::Path;
use std::process::Command;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::colors::colormaps::ViridisRGB;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::{AnalysisError, Result};
use crate::ranking::{sort_by_score, TOP_N};
use crate::types::{scored_records, ScoredRecord};

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 22;
const MARGIN: u32 = 15;
const POINT_SIZE: i32 = 6;
const COLORBAR_WIDTH: i32 = 110;
const SCORE_AXIS_MAX: f64 = 105.0;

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const CORAL: RGBColor = RGBColor(255, 127, 80);
const FOREST_GREEN: RGBColor = RGBColor(0, 128, 0);

/// A point whose fill encodes a third value on the 0..100 score scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredPoint {
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// State code and score, highest score first.
    pub top_scores: Vec<(String, f64)>,
    pub deficit_vs_installation: Vec<ColoredPoint>,
    pub gdp_per_capita_vs_score: Vec<(f64, f64)>,
    pub population_vs_capacity: Vec<(f64, f64)>,
}

impl ChartData {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let ranked = scored_records(&sort_by_score(df)?)?;
        Ok(Self::from_records(&ranked))
    }

    /// Expects `ranked` sorted by score, highest first.
    pub fn from_records(ranked: &[ScoredRecord]) -> Self {
        Self {
            top_scores: ranked
                .iter()
                .take(TOP_N)
                .map(|r| (r.code.clone(), r.potential_score))
                .collect(),
            deficit_vs_installation: ranked
                .iter()
                .map(|r| ColoredPoint {
                    x: r.deficit_mw,
                    y: r.installation_potential_mw,
                    score: r.potential_score,
                })
                .collect(),
            gdp_per_capita_vs_score: ranked
                .iter()
                .map(|r| (r.gdp_per_capita, r.potential_score))
                .collect(),
            population_vs_capacity: ranked
                .iter()
                .map(|r| (r.population_millions, r.installed_capacity_mw))
                .collect(),
        }
    }
}

/// Renders the dashboard to a PNG at `path`, overwriting it.
pub fn render_charts(df: &DataFrame, path: &Path, size: (u32, u32)) -> Result<()> {
    let data = ChartData::from_frame(df)?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_dashboard(&root, &data).map_err(|e| AnalysisError::Chart(e.to_string()))?;
    root.present().map_err(|e| AnalysisError::Chart(e.to_string()))?;

    info!(path = %path.display(), width = size.0, height = size.1, "Chart written");
    Ok(())
}

/// Lays the four panels out on a 2x2 grid.
pub fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &ChartData,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 2));

    draw_top_scores(&areas[0], &data.top_scores)?;
    draw_deficit_vs_installation(&areas[1], &data.deficit_vs_installation)?;
    draw_scatter(
        &areas[2],
        "PIB per Capita vs Score de Potencial",
        ("PIB per Capita (R$)", "Score de Potencial"),
        &data.gdp_per_capita_vs_score,
        CORAL,
    )?;
    draw_scatter(
        &areas[3],
        "População vs Capacidade Instalada",
        ("População (Milhões)", "Capacidade Atual (MW)"),
        &data.population_vs_capacity,
        FOREST_GREEN,
    )?;

    Ok(())
}

fn draw_top_scores<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    top_scores: &[(String, f64)],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = top_scores.len().max(1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Top 10 Estados - Score de Potencial Energético",
            (FONT, CAPTION_SIZE),
        )
        .margin(MARGIN)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..SCORE_AXIS_MAX, (0..n).into_segmented())?;

    // Rank one sits on the top row.
    let label_for = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(row) => top_scores
            .get((n - 1 - row) as usize)
            .map(|(code, _)| code.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Score de Potencial")
        .y_labels(n as usize)
        .y_label_formatter(&label_for)
        .draw()?;

    chart.draw_series(top_scores.iter().enumerate().map(|(rank, (_, score))| {
        let row = n - 1 - rank as i32;
        let mut bar = Rectangle::new(
            [(0.0, SegmentValue::Exact(row)), (*score, SegmentValue::Exact(row + 1))],
            STEEL_BLUE.filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    Ok(())
}

fn draw_deficit_vs_installation<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[ColoredPoint],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let width = area.dim_in_pixel().0 as i32;
    let (plot_area, colorbar_area) = area.split_horizontally(width - COLORBAR_WIDTH);

    let x_range = padded_range(points.iter().map(|p| p.x));
    let y_range = padded_range(points.iter().map(|p| p.y));

    let mut chart = ChartBuilder::on(&plot_area)
        .caption("Déficit vs Potencial de Instalação", (FONT, CAPTION_SIZE))
        .margin(MARGIN)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Déficit Atual (MW)")
        .y_desc("Potencial de Instalação (MW)")
        .draw()?;

    chart.draw_series(points.iter().map(|p| {
        Circle::new(
            (p.x, p.y),
            POINT_SIZE,
            score_color(p.score).mix(0.7).filled(),
        )
    }))?;

    let mut colorbar = ChartBuilder::on(&colorbar_area)
        .margin(MARGIN)
        .margin_top(MARGIN + CAPTION_SIZE + 10)
        .x_label_area_size(40)
        .y_label_area_size(45)
        .build_cartesian_2d(0.0..1.0, 0.0..100.0)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Score Potencial")
        .draw()?;

    colorbar.draw_series((0..100).map(|step| {
        let low = step as f64;
        Rectangle::new([(0.0, low), (1.0, low + 1.0)], score_color(low).filled())
    }))?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    (x_desc, y_desc): (&str, &str),
    points: &[(f64, f64)],
    color: RGBColor,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x_range = padded_range(points.iter().map(|(x, _)| *x));
    let y_range = padded_range(points.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, CAPTION_SIZE))
        .margin(MARGIN)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|(x, y)| Circle::new((*x, *y), POINT_SIZE, color.mix(0.7).filled())),
    )?;

    Ok(())
}

/// Axis range covering every value with a 5% pad; flat or empty inputs still get a
/// non-empty range.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span == 0.0 {
        (max.abs() * 0.1).max(1.0)
    } else {
        span * 0.05
    };

    (min - pad)..(max + pad)
}

/// Viridis colour for a score on the 0..100 scale; non-finite scores take the low end.
pub fn score_color(score: f64) -> RGBColor {
    let score = if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    };
    ViridisRGB::get_color_normalized(score, 0.0, 100.0)
}

/// Hands the written image to the platform viewer without waiting for it.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };

    command.arg(path).spawn()?;
    info!(path = %path.display(), "Opened chart in viewer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_widens_flat_input() {
        let range = padded_range([5.0, 5.0].into_iter());
        assert!(range.start < 5.0 && range.end > 5.0);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn score_colors_span_the_viridis_map() {
        assert_eq!(score_color(0.0), RGBColor(68, 1, 84));
        assert_eq!(score_color(100.0), RGBColor(254, 232, 37));
        assert_eq!(score_color(f64::NAN), score_color(0.0));
        assert_eq!(score_color(250.0), score_color(100.0));
    }
}
