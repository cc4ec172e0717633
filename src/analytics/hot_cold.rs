//! Hot and cold topic detection
//!
//! Composes the pipeline stages: yearly aggregation, trailing smoothing,
//! correlation with year, ranking, and (optionally) chart rendering.
//!
//! # Example
//!
//! ```no_run
//! use ondo::analytics::{analyze, AnalysisOptions};
//! use ondo::parser::load_topic_proportions;
//!
//! fn main() -> ondo::error::Result<()> {
//!     let docs = load_topic_proportions("doc_topics.csv")?;
//!     let result = analyze(&docs, &AnalysisOptions::default())?;
//!     for record in &result.positive_correlations {
//!         println!("{} r={:.3}", record.topic_label, record.correlation);
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::chart::{ChartRenderer, TrendChart, TrendKind};
use crate::error::Result;
use crate::models::{CorrelationRecord, DocumentTopics, LongRecord, TopicTable};

use super::aggregate::aggregate_by_year;
use super::correlation::correlation_table;
use super::error::{TrendError, TrendResult};
use super::ranking::rank_topics;
use super::smoothing::{trailing_moving_average, YearAxis};

/// Default significance threshold
pub const DEFAULT_PVAL_THRESHOLD: f64 = 0.05;

/// Default moving-average window, in years
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;

/// Default legend font size for the charts
pub const DEFAULT_LEGEND_FONT_SIZE: u32 = 12;

/// Default number of topics selected per direction
pub const DEFAULT_TOP_N: usize = 5;

/// Tuning knobs for [`analyze`] and [`compute_hot_cold_topics`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Maximum p-value for a topic to count as trending
    pub pval_threshold: f64,

    /// Trailing moving-average window size
    pub moving_average_window: usize,

    /// Legend font size used when rendering
    pub legend_font_size: u32,

    /// Topics selected per direction
    pub top_n: usize,

    /// Whether the year column is smoothed along with the topics
    pub year_axis: YearAxis,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            pval_threshold: DEFAULT_PVAL_THRESHOLD,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            legend_font_size: DEFAULT_LEGEND_FONT_SIZE,
            top_n: DEFAULT_TOP_N,
            year_axis: YearAxis::default(),
        }
    }
}

impl AnalysisOptions {
    /// Check the options before running the pipeline
    ///
    /// # Errors
    /// Returns an error for a zero window or a threshold outside `[0, 1]`.
    pub fn validate(&self) -> TrendResult<()> {
        if self.moving_average_window == 0 {
            return Err(TrendError::InvalidWindowSize(self.moving_average_window));
        }
        if !(0.0..=1.0).contains(&self.pval_threshold) {
            return Err(TrendError::InvalidThreshold(self.pval_threshold));
        }
        Ok(())
    }
}

/// Everything the hot/cold analysis produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotColdTopics {
    /// Smoothed year plus the positively trending topic columns
    pub top_positive: TopicTable,

    /// Smoothed year plus the negatively trending topic columns
    pub top_negative: TopicTable,

    /// Correlation records behind `top_positive`, in ranked order
    pub positive_correlations: Vec<CorrelationRecord>,

    /// Correlation records behind `top_negative`, in ranked order
    pub negative_correlations: Vec<CorrelationRecord>,

    /// Correlation of every topic, in column order
    pub correlations: Vec<CorrelationRecord>,

    /// The smoothed yearly table the correlations were computed on
    pub smoothed: TopicTable,
}

impl HotColdTopics {
    /// Long-form `(year, topic, value)` rows of the positive selection
    #[must_use]
    pub fn positive_long(&self) -> Vec<LongRecord> {
        self.top_positive.to_long()
    }

    /// Long-form `(year, topic, value)` rows of the negative selection
    #[must_use]
    pub fn negative_long(&self) -> Vec<LongRecord> {
        self.top_negative.to_long()
    }

    /// Build the hot and cold charts for this result
    #[must_use]
    pub fn charts(&self, legend_font_size: u32) -> [TrendChart; 2] {
        [
            TrendChart::from_long(TrendKind::Hot, &self.positive_long(), legend_font_size),
            TrendChart::from_long(TrendKind::Cold, &self.negative_long(), legend_font_size),
        ]
    }
}

/// Run the analysis without rendering anything
///
/// # Arguments
/// * `docs` - Per-document topic proportions with a year column
/// * `options` - Threshold, window and selection size
///
/// # Errors
/// Fails on invalid options or a non-finite year. Too few years, no
/// significant topics and undefined correlations are not errors; they
/// produce empty selections.
pub fn analyze(docs: &DocumentTopics, options: &AnalysisOptions) -> TrendResult<HotColdTopics> {
    options.validate()?;

    if let Some(row) = docs.table.year().iter().position(|y| !y.is_finite()) {
        return Err(TrendError::NonNumericYear {
            row,
            value: docs.table.year()[row].to_string(),
        });
    }

    let yearly = aggregate_by_year(docs)?;
    let smoothed = trailing_moving_average(&yearly, options.moving_average_window, options.year_axis)?;

    let correlations = correlation_table(&smoothed);
    let ranked = rank_topics(&correlations, options.pval_threshold, options.top_n)?;

    let top_positive = smoothed.select(&ranked.positive_labels())?;
    let top_negative = smoothed.select(&ranked.negative_labels())?;

    if ranked.positive.is_empty() && ranked.negative.is_empty() {
        tracing::warn!(
            years = %yearly.len(),
            smoothed_rows = %smoothed.len(),
            threshold = %options.pval_threshold,
            "No topic trends significantly with year"
        );
    }

    Ok(HotColdTopics {
        top_positive,
        top_negative,
        positive_correlations: ranked.positive,
        negative_correlations: ranked.negative,
        correlations,
        smoothed,
    })
}

/// Hand the hot chart, then the cold chart, to `renderer`
///
/// # Errors
/// Stops at the first renderer failure.
pub fn render_charts(
    result: &HotColdTopics,
    legend_font_size: u32,
    renderer: &dyn ChartRenderer,
) -> Result<()> {
    for chart in result.charts(legend_font_size) {
        renderer.render(&chart)?;
    }
    Ok(())
}

/// Run the analysis and render the hot and cold charts
///
/// Both charts are handed to `renderer` (hot first); an empty selection
/// still renders an empty chart.
///
/// # Errors
/// Propagates analysis errors and renderer failures.
pub fn compute_hot_cold_topics(
    docs: &DocumentTopics,
    options: &AnalysisOptions,
    renderer: &dyn ChartRenderer,
) -> Result<HotColdTopics> {
    let result = analyze(docs, options)?;
    render_charts(&result, options.legend_font_size, renderer)?;

    tracing::info!(
        hot = %result.positive_correlations.len(),
        cold = %result.negative_correlations.len(),
        topics = %result.correlations.len(),
        "Hot and cold topic analysis complete"
    );

    Ok(result)
}
