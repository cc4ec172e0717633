//! ondo - Hot and cold topic trend analysis
//!
//! Takes the per-document topic proportions of an LDA model, averages them
//! per year, smooths them with a trailing moving average, correlates every
//! topic with year and picks the topics trending most clearly up ("hot")
//! and down ("cold").
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`parser`] - Reading topic proportion tables from CSV
//! - [`models`] - Core data structures and types
//! - [`analytics`] - Aggregation, smoothing, correlation and ranking
//! - [`chart`] - Line charts of the selected topics
//! - [`storage`] - Export of result tables
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use ondo::analytics::{compute_hot_cold_topics, AnalysisOptions};
//! use ondo::chart::{ImageFormat, PlottersRenderer};
//! use ondo::parser::load_topic_proportions;
//!
//! fn main() -> ondo::error::Result<()> {
//!     let docs = load_topic_proportions("doc_topics.csv")?;
//!     let renderer = PlottersRenderer::new("output", ImageFormat::Svg, 1024, 640);
//!     let result = compute_hot_cold_topics(&docs, &AnalysisOptions::default(), &renderer)?;
//!     println!("{} hot, {} cold", result.positive_correlations.len(), result.negative_correlations.len());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{analyze, compute_hot_cold_topics, AnalysisOptions, HotColdTopics, YearAxis};
    pub use crate::chart::{ChartRenderer, ImageFormat, NoopRenderer, PlottersRenderer, TrendChart, TrendKind};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, OndoErrorTrait, Result};
    pub use crate::models::{CorrelationRecord, DocumentTopics, LongRecord, TopicTable};
    pub use crate::parser::{load_topic_proportions, parse_topic_proportions};
    pub use crate::storage::ResultWriter;
}

// Direct re-exports for convenience
pub use models::{CorrelationRecord, DocumentTopics, LongRecord, TopicTable};
