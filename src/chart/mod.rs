//! Line charts of hot and cold topic proportions
//!
//! A [`TrendChart`] is a backend-free description of one chart (one line per
//! topic, year on the x axis). A [`ChartRenderer`] turns it into output;
//! [`PlottersRenderer`] writes SVG or PNG files, [`NoopRenderer`] discards.

use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::LongRecord;

/// Errors raised while rendering charts
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart backend error: {0}")]
    Backend(String),

    #[error("Chart I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Which end of the ranking a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendKind {
    /// Positively correlated with year
    Hot,

    /// Negatively correlated with year
    Cold,
}

impl TrendKind {
    /// Chart caption
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Hot => "Hot topics",
            Self::Cold => "Cold topics",
        }
    }

    /// Output file name without extension
    #[must_use]
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Hot => "hot_topics",
            Self::Cold => "cold_topics",
        }
    }
}

/// One line of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Backend-independent description of a trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub kind: TrendKind,
    pub series: Vec<TopicSeries>,
    pub legend_font_size: u32,
}

impl TrendChart {
    /// Build a chart from long-form `(year, topic, value)` records
    ///
    /// Series appear in the order their topic first occurs in `records`.
    #[must_use]
    pub fn from_long(kind: TrendKind, records: &[LongRecord], legend_font_size: u32) -> Self {
        let mut series: Vec<TopicSeries> = Vec::new();

        for record in records {
            let point = (record.year, record.value);
            match series.iter_mut().find(|s| s.label == record.topic) {
                Some(existing) => existing.points.push(point),
                None => series.push(TopicSeries {
                    label: record.topic.clone(),
                    points: vec![point],
                }),
            }
        }

        Self {
            kind,
            series,
            legend_font_size,
        }
    }

    /// Check if there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// X axis range covering every point, `0..1` when empty
    #[must_use]
    pub fn x_range(&self) -> Range<f64> {
        padded_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)), 0.0)
    }

    /// Y axis range covering every point with a 5% margin, `0..1` when empty
    #[must_use]
    pub fn y_range(&self) -> Range<f64> {
        padded_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)), 0.05)
    }
}

/// Range over the values, widened by `margin` of its span; degenerate
/// ranges are widened by one unit around the single value.
fn padded_range<I>(values: I, margin: f64) -> Range<f64>
where
    I: Iterator<Item = f64>,
{
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = (max - min) * margin;
    (min - pad)..(max + pad)
}

/// Something that can present a trend chart
pub trait ChartRenderer {
    /// Render one chart
    ///
    /// # Errors
    /// Returns [`ChartError`] if the chart cannot be produced.
    fn render(&self, chart: &TrendChart) -> Result<(), ChartError>;
}

/// Renderer that discards every chart
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn render(&self, chart: &TrendChart) -> Result<(), ChartError> {
        tracing::debug!(kind = ?chart.kind, "Chart rendering disabled, skipping");
        Ok(())
    }
}

/// Image format written by [`PlottersRenderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    /// Parse from a config or CLI value
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// File extension
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Writes charts as image files with `plotters`
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    output_dir: PathBuf,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    /// Create a renderer writing into `output_dir`
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, format: ImageFormat, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            width,
            height,
        }
    }

    /// Path a chart of the given kind is written to
    #[must_use]
    pub fn path_for(&self, kind: TrendKind) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", kind.file_stem(), self.format.extension()))
    }

    fn draw<DB>(root: DrawingArea<DB, plotters::coord::Shift>, chart: &TrendChart) -> Result<(), ChartError>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE).map_err(ChartError::backend)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.kind.title(), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(chart.x_range(), chart.y_range())
            .map_err(ChartError::backend)?;

        ctx.configure_mesh()
            .x_desc("Year")
            .y_desc("Topic proportion")
            .x_label_formatter(&|x| format!("{x:.0}"))
            .draw()
            .map_err(ChartError::backend)?;

        for (idx, series) in chart.series.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            let style = color.stroke_width(2);

            ctx.draw_series(LineSeries::new(series.points.iter().copied(), style))
                .map_err(ChartError::backend)?
                .label(series.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        if !chart.series.is_empty() {
            ctx.configure_series_labels()
                .label_font(("sans-serif", chart.legend_font_size))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(ChartError::backend)?;
        }

        root.present().map_err(ChartError::backend)?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &TrendChart) -> Result<(), ChartError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(chart.kind);
        let size = (self.width, self.height);

        if chart.is_empty() {
            tracing::warn!(kind = ?chart.kind, "No topics selected, rendering an empty chart");
        }

        match self.format {
            ImageFormat::Svg => Self::draw(SVGBackend::new(&path, size).into_drawing_area(), chart)?,
            ImageFormat::Png => Self::draw(BitMapBackend::new(&path, size).into_drawing_area(), chart)?,
        }

        tracing::info!(path = %path.display(), series = %chart.series.len(), "Chart written");
        Ok(())
    }
}
