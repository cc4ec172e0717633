//! Error scenario integration tests
//!
//! Tests the failure modes and the conditions that must not fail:
//! 1. Missing or non-numeric year column
//! 2. Invalid analysis options
//! 3. Unreadable input files
//! 4. Renderer failures

use ondo::analytics::{
    analyze, compute_hot_cold_topics, render_charts, AnalysisOptions, TrendError,
};
use ondo::chart::{ChartError, ChartRenderer, TrendChart};
use ondo::error::{Error, ErrorCategory, OndoErrorTrait};
use ondo::parser::{load_topic_proportions, parse_topic_proportions};
use ondo::storage::ResultWriter;
use tempfile::TempDir;

use super::fixtures::{BAD_YEAR_CSV, NO_YEAR_CSV};
use crate::common;

struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _chart: &TrendChart) -> Result<(), ChartError> {
        Err(ChartError::Backend("no font available".to_string()))
    }
}

#[test]
fn test_missing_year_column_fails_fast() {
    let err = parse_topic_proportions(NO_YEAR_CSV.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::Trend(TrendError::MissingYearColumn)));
    assert_eq!(err.category(), ErrorCategory::Input);
    assert!(!err.is_recoverable());
}

#[test]
fn test_non_numeric_year_reports_row() {
    let err = parse_topic_proportions(BAD_YEAR_CSV.as_bytes()).unwrap_err();
    match err {
        Error::Trend(TrendError::NonNumericYear { row, value }) => {
            assert_eq!(row, 1);
            assert_eq!(value, "twenty-eleven");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_table_is_not_an_error() {
    let docs = parse_topic_proportions("id,year,t1,t2\n".as_bytes()).unwrap();
    let result = analyze(&docs, &AnalysisOptions::default()).unwrap();

    assert!(result.smoothed.is_empty());
    assert_eq!(result.correlations.len(), 2);
    assert!(result.correlations.iter().all(|r| !r.is_defined()));
    assert!(result.positive_correlations.is_empty());
}

#[test]
fn test_zero_window_rejected() {
    let options = AnalysisOptions {
        moving_average_window: 0,
        ..Default::default()
    };
    let err = analyze(&common::rising_and_falling(), &options).unwrap_err();
    assert!(matches!(err, TrendError::InvalidWindowSize(0)));
}

#[test]
fn test_threshold_out_of_range_rejected() {
    let options = AnalysisOptions {
        pval_threshold: 1.01,
        ..Default::default()
    };
    let err: Error = analyze(&common::rising_and_falling(), &options)
        .unwrap_err()
        .into();
    assert_eq!(err.category(), ErrorCategory::Analysis);
}

#[test]
fn test_missing_input_file() {
    let err = load_topic_proportions("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, Error::Other { .. }));
    assert!(err.to_string().contains("Failed to open input file"));
}

#[test]
fn test_renderer_failure_propagates() {
    let err = compute_hot_cold_topics(
        &common::rising_and_falling(),
        &AnalysisOptions::default(),
        &FailingRenderer,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Chart(ChartError::Backend(_))));
    assert_eq!(err.category(), ErrorCategory::Render);
}

#[test]
fn test_tables_survive_chart_failure() {
    let dir = TempDir::new().unwrap();
    let result = analyze(&common::rising_and_falling(), &AnalysisOptions::default()).unwrap();

    let written = ResultWriter::new(dir.path()).write_all(&result).unwrap();
    let err = render_charts(&result, 12, &FailingRenderer).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Render);
    assert_eq!(written.len(), 6);
    assert!(written.iter().all(|p| p.exists()));
}
