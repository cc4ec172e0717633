//! Analytics module for hot and cold topic trend analysis
//!
//! The pipeline runs in four stages, each in its own module:
//! yearly aggregation, trailing smoothing, per-topic correlation with year,
//! and ranking of significant topics. [`hot_cold`] composes them.

pub mod aggregate;
pub mod correlation;
pub mod error;
pub mod hot_cold;
pub mod ranking;
pub mod smoothing;

pub use aggregate::aggregate_by_year;
pub use correlation::{correlation_table, pearson, Correlation};
pub use error::{TrendError, TrendResult};
pub use hot_cold::{
    analyze, compute_hot_cold_topics, render_charts, AnalysisOptions, HotColdTopics,
};
pub use ranking::{rank_topics, RankedTopics};
pub use smoothing::{trailing_moving_average, YearAxis};
