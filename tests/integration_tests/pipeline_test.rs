//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow:
//! 1. CSV parsing
//! 2. Yearly aggregation and smoothing
//! 3. Correlation ranking
//! 4. Chart hand-off and table export

use ondo::analytics::{
    aggregate_by_year, analyze, compute_hot_cold_topics, AnalysisOptions, YearAxis,
};
use ondo::chart::{ChartError, ChartRenderer, NoopRenderer, TrendChart, TrendKind};
use ondo::models::{DocumentTopics, TopicTable};
use ondo::parser::{load_topic_proportions, parse_topic_proportions};
use ondo::storage::ResultWriter;
use std::cell::RefCell;
use tempfile::TempDir;

use super::fixtures::{SAMPLE_DOC_TOPICS_CSV, SHORT_DOC_TOPICS_CSV, UNORDERED_DOC_TOPICS_CSV};
use crate::common;

#[derive(Default)]
struct RecordingRenderer {
    charts: RefCell<Vec<TrendChart>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, chart: &TrendChart) -> Result<(), ChartError> {
        self.charts.borrow_mut().push(chart.clone());
        Ok(())
    }
}

// ============================================================================
// Selection Scenarios
// ============================================================================

#[test]
fn test_rising_topic_is_hot_and_falling_topic_is_cold() {
    let docs = common::rising_and_falling();
    let options = AnalysisOptions {
        moving_average_window: 1,
        pval_threshold: 0.05,
        ..Default::default()
    };

    let result = analyze(&docs, &options).unwrap();

    assert_eq!(result.positive_correlations.len(), 1);
    assert_eq!(result.positive_correlations[0].topic_label, "topic_1");
    assert!((result.positive_correlations[0].correlation - 1.0).abs() < 1e-9);
    assert!(result.positive_correlations[0].p_value < 0.001);

    assert_eq!(result.negative_correlations.len(), 1);
    assert_eq!(result.negative_correlations[0].topic_label, "topic_2");
    assert!((result.negative_correlations[0].correlation + 1.0).abs() < 1e-9);
}

#[test]
fn test_sample_csv_end_to_end() {
    let docs = parse_topic_proportions(SAMPLE_DOC_TOPICS_CSV.as_bytes()).unwrap();
    assert_eq!(docs.len(), 16);

    let options = AnalysisOptions {
        moving_average_window: 3,
        ..Default::default()
    };
    let renderer = RecordingRenderer::default();
    let result = compute_hot_cold_topics(&docs, &options, &renderer).unwrap();

    // 8 distinct years, window 3 -> 6 smoothed rows
    assert_eq!(result.smoothed.len(), 6);
    assert_eq!(result.top_positive.labels(), &["rise".to_string()]);
    assert_eq!(result.top_negative.labels(), &["fall".to_string()]);

    // Constant topics have no defined correlation
    let excluded: Vec<_> = result
        .correlations
        .iter()
        .filter(|r| !r.is_defined())
        .map(|r| r.topic_label.as_str())
        .collect();
    assert_eq!(excluded, vec!["flat", "steady"]);

    let charts = renderer.charts.borrow();
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].kind, TrendKind::Hot);
    assert_eq!(charts[0].series.len(), 1);
    assert_eq!(charts[0].series[0].points.len(), 6);
    assert_eq!(charts[1].kind, TrendKind::Cold);
}

#[test]
fn test_topic_index_matches_column_position() {
    let docs = parse_topic_proportions(SAMPLE_DOC_TOPICS_CSV.as_bytes()).unwrap();
    let yearly = aggregate_by_year(&docs).unwrap();
    let result = analyze(&docs, &AnalysisOptions::default()).unwrap();

    for record in result
        .positive_correlations
        .iter()
        .chain(&result.negative_correlations)
    {
        assert_eq!(yearly.labels()[record.topic_index - 1], record.topic_label);
    }
}

#[test]
fn test_at_most_top_n_per_direction() {
    // 8 rising and 8 falling topics with different slopes
    let docs = common::yearly_documents(1990, 20, 16, |topic, i| {
        let slope = 0.001 * (topic % 8 + 1) as f64;
        if topic < 8 {
            0.1 + slope * i as f64
        } else {
            0.5 - slope * i as f64
        }
    });

    let result = analyze(&docs, &AnalysisOptions::default()).unwrap();
    assert_eq!(result.positive_correlations.len(), 5);
    assert_eq!(result.negative_correlations.len(), 5);
    assert_eq!(result.top_positive.topic_count(), 5);
    assert_eq!(result.top_negative.topic_count(), 5);
    assert!(result.positive_correlations.iter().all(|r| r.correlation > 0.0));
    assert!(result.negative_correlations.iter().all(|r| r.correlation < 0.0));
}

#[test]
fn test_top_n_option() {
    let docs = common::yearly_documents(1990, 15, 4, |topic, i| 0.1 + 0.01 * (topic + 1) as f64 * i as f64);
    let options = AnalysisOptions {
        top_n: 2,
        ..Default::default()
    };

    let result = analyze(&docs, &options).unwrap();
    assert_eq!(result.positive_correlations.len(), 2);
}

// ============================================================================
// Empty Result Scenarios
// ============================================================================

#[test]
fn test_three_years_with_window_five_is_empty() {
    let docs = parse_topic_proportions(SHORT_DOC_TOPICS_CSV.as_bytes()).unwrap();
    let renderer = RecordingRenderer::default();

    let result = compute_hot_cold_topics(&docs, &AnalysisOptions::default(), &renderer).unwrap();

    assert_eq!(result.smoothed.len(), 0);
    assert_eq!(result.top_positive.len(), 0);
    assert_eq!(result.top_negative.len(), 0);
    assert!(result.positive_correlations.is_empty());
    assert!(result.negative_correlations.is_empty());
    assert!(renderer.charts.borrow().iter().all(TrendChart::is_empty));
}

#[test]
fn test_constant_topic_excluded() {
    let docs = common::yearly_documents(2000, 12, 2, |topic, i| match topic {
        0 => 0.05,
        _ => 0.1 + 0.01 * i as f64,
    });

    let result = analyze(&docs, &AnalysisOptions::default()).unwrap();
    let selected: Vec<_> = result
        .positive_correlations
        .iter()
        .chain(&result.negative_correlations)
        .map(|r| r.topic_label.as_str())
        .collect();
    assert_eq!(selected, vec!["topic_2"]);
}

#[test]
fn test_constant_topic_excluded_with_uneven_documents_per_year() {
    for value in [0.05, 0.1, 0.7] {
        for docs_per_year in [2, 3, 7] {
            // One document a year until 1985, then several
            let mut year = Vec::new();
            for y in 1960..=2011 {
                let count = if y < 1986 { 1 } else { docs_per_year };
                year.extend(std::iter::repeat(f64::from(y)).take(count));
            }
            let rising: Vec<f64> = year.iter().map(|y| (y - 1960.0) * 0.01).collect();
            let flat = vec![value; year.len()];
            let ids = (0..year.len()).map(|i| format!("doc{i}")).collect();
            let labels = vec!["flat".to_string(), "rising".to_string()];
            let table = TopicTable::new(year, labels, vec![flat, rising]).unwrap();
            let docs = DocumentTopics::new(ids, table).unwrap();

            let yearly = aggregate_by_year(&docs).unwrap();
            assert!(yearly.column(0).unwrap().iter().all(|&v| v == value));

            for window in [1, 3, 5] {
                let options = AnalysisOptions {
                    moving_average_window: window,
                    ..Default::default()
                };
                let result = analyze(&docs, &options).unwrap();

                assert!(!result.correlations[0].is_defined());
                let selected: Vec<_> = result
                    .positive_correlations
                    .iter()
                    .chain(&result.negative_correlations)
                    .map(|r| r.topic_label.as_str())
                    .collect();
                assert_eq!(
                    selected,
                    vec!["rising"],
                    "value {value}, {docs_per_year} docs, window {window}"
                );
            }
        }
    }
}

#[test]
fn test_nothing_significant_gives_year_only_tables() {
    // Alternating values, no trend
    let docs = common::yearly_documents(2000, 10, 1, |_, i| if i % 2 == 0 { 0.2 } else { 0.3 });
    let options = AnalysisOptions {
        moving_average_window: 1,
        ..Default::default()
    };

    let result = analyze(&docs, &options).unwrap();
    assert_eq!(result.top_positive.topic_count(), 0);
    assert_eq!(result.top_negative.topic_count(), 0);
    assert_eq!(result.top_positive.len(), 10);
}

// ============================================================================
// Year Handling
// ============================================================================

#[test]
fn test_unordered_years_are_grouped() {
    let docs = parse_topic_proportions(UNORDERED_DOC_TOPICS_CSV.as_bytes()).unwrap();
    let yearly = aggregate_by_year(&docs).unwrap();

    assert_eq!(yearly.year(), &[2000.0, 2001.0, 2002.0, 2003.0]);
    let values = yearly.column(0).unwrap();
    assert!((values[1] - 0.3).abs() < 1e-12);
}

#[test]
fn test_year_axis_modes_share_rows() {
    let docs = common::rising_and_falling();
    let smoothed = analyze(&docs, &AnalysisOptions::default()).unwrap().smoothed;
    let raw = analyze(
        &docs,
        &AnalysisOptions {
            year_axis: YearAxis::Raw,
            ..Default::default()
        },
    )
    .unwrap()
    .smoothed;

    assert_eq!(smoothed.len(), raw.len());
    assert_eq!(smoothed.year()[0], 2002.0);
    assert_eq!(raw.year()[0], 2004.0);
    assert_eq!(smoothed.columns(), raw.columns());
}

// ============================================================================
// File Output
// ============================================================================

#[test]
fn test_load_analyze_and_export() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc_topics.csv");
    std::fs::write(&input, common::to_csv(&common::rising_and_falling())).unwrap();

    let docs = load_topic_proportions(&input).unwrap();
    let result = compute_hot_cold_topics(&docs, &AnalysisOptions::default(), &NoopRenderer).unwrap();

    let out = dir.path().join("out");
    let written = ResultWriter::new(&out).write_all(&result).unwrap();
    assert_eq!(written.len(), 6);

    let correlations = std::fs::read_to_string(out.join("correlations.csv")).unwrap();
    let mut lines = correlations.lines();
    assert_eq!(lines.next(), Some("correlation,p_value,topic_label,topic_index"));
    assert_eq!(lines.count(), 2);

    let long = std::fs::read_to_string(out.join("top_positive_long.csv")).unwrap();
    // header + one row per smoothed year
    assert_eq!(long.lines().count(), 1 + result.smoothed.len());
}
