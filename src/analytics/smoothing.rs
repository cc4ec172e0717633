//! Trailing moving-average smoothing of yearly topic proportions

use serde::{Deserialize, Serialize};

use crate::models::TopicTable;

use super::error::{TrendError, TrendResult};

/// How the year column is carried through smoothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearAxis {
    /// The year column is smoothed with the same window as the topics, so
    /// each row's year is the mean year of its window
    #[default]
    Smoothed,

    /// Each row keeps the raw year of the last row in its window
    Raw,
}

impl YearAxis {
    /// Parse from a config or CLI value
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "smoothed" | "smooth" => Some(Self::Smoothed),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }

    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smoothed => "smoothed",
            Self::Raw => "raw",
        }
    }
}

/// Apply a trailing (causal) moving average to every column
///
/// Each output value is the mean of the current and the previous
/// `window - 1` input values. The first `window - 1` rows have no full
/// window and are dropped, as is any row whose window contains a missing
/// value in any column. With fewer than `window` rows the result is empty.
///
/// # Arguments
/// * `table` - Yearly aggregated proportions, sorted by year
/// * `window` - Window size, at least 1
/// * `year_axis` - Whether the year column is smoothed or passed through
///
/// # Errors
/// Returns [`TrendError::InvalidWindowSize`] when `window` is 0.
pub fn trailing_moving_average(
    table: &TopicTable,
    window: usize,
    year_axis: YearAxis,
) -> TrendResult<TopicTable> {
    if window == 0 {
        return Err(TrendError::InvalidWindowSize(window));
    }

    let labels = table.labels().to_vec();
    if table.len() < window {
        tracing::debug!(
            rows = %table.len(),
            window = %window,
            "Not enough years for a full window, smoothed table is empty"
        );
        return Ok(TopicTable::empty(labels));
    }

    let year = match year_axis {
        YearAxis::Smoothed => rolling_mean(table.year(), window),
        YearAxis::Raw => table.year()[window - 1..].to_vec(),
    };
    let columns: Vec<Vec<f64>> = table
        .columns()
        .iter()
        .map(|column| rolling_mean(column, window))
        .collect();

    let keep: Vec<usize> = (0..year.len())
        .filter(|&i| !year[i].is_nan() && columns.iter().all(|c| !c[i].is_nan()))
        .collect();

    let dropped = year.len() - keep.len();
    if dropped > 0 {
        tracing::debug!(dropped = %dropped, "Dropped smoothed rows with missing values");
    }

    let year = keep.iter().map(|&i| year[i]).collect();
    let columns = columns
        .iter()
        .map(|c| keep.iter().map(|&i| c[i]).collect())
        .collect();

    TopicTable::new(year, labels, columns)
}

/// Means of every full trailing window; `values.len() - window + 1` outputs
fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}
