//! Core data structures for topic trend analysis
//!
//! All tables are column-major: one `Vec<f64>` per topic, aligned with a
//! shared `year` column. Missing values are represented as `NaN`.

use serde::{Deserialize, Serialize};

use crate::analytics::TrendError;

/// A year column plus one column of values per topic
///
/// Used for the per-document input, the yearly aggregate, the smoothed
/// table and the selected hot/cold subsets alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicTable {
    /// Year value of every row
    year: Vec<f64>,

    /// Topic labels, in column order
    labels: Vec<String>,

    /// One column per label, each as long as `year`
    columns: Vec<Vec<f64>>,
}

impl TopicTable {
    /// Build a table from a year column and labelled topic columns
    ///
    /// # Errors
    /// Returns [`TrendError::ShapeMismatch`] when the label count differs from
    /// the column count or a column length differs from the year column.
    pub fn new(
        year: Vec<f64>,
        labels: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, TrendError> {
        if labels.len() != columns.len() {
            return Err(TrendError::ShapeMismatch {
                expected: labels.len(),
                actual: columns.len(),
            });
        }

        if let Some(bad) = columns.iter().find(|c| c.len() != year.len()) {
            return Err(TrendError::ShapeMismatch {
                expected: year.len(),
                actual: bad.len(),
            });
        }

        Ok(Self {
            year,
            labels,
            columns,
        })
    }

    /// Table with the given labels and no rows
    #[must_use]
    pub fn empty(labels: Vec<String>) -> Self {
        let columns = vec![Vec::new(); labels.len()];
        Self {
            year: Vec::new(),
            labels,
            columns,
        }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.year.len()
    }

    /// Check if the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
    }

    /// Number of topic columns (the year column is not counted)
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.labels.len()
    }

    /// The year column
    #[must_use]
    pub fn year(&self) -> &[f64] {
        &self.year
    }

    /// Topic labels in column order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// All topic columns in label order
    #[must_use]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Column at a 0-based position
    #[must_use]
    pub fn column(&self, idx: usize) -> Option<&[f64]> {
        self.columns.get(idx).map(Vec::as_slice)
    }

    /// Column for a topic label
    #[must_use]
    pub fn column_by_label(&self, label: &str) -> Option<&[f64]> {
        self.position(label).and_then(|idx| self.column(idx))
    }

    /// 0-based position of a topic label
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Iterate `(label, column)` pairs
    pub fn topics(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Keep the year column and only the named topics, in the given order
    ///
    /// # Errors
    /// Returns [`TrendError::UnknownTopic`] if a label is not in the table.
    pub fn select<S: AsRef<str>>(&self, labels: &[S]) -> Result<Self, TrendError> {
        let mut picked_labels = Vec::with_capacity(labels.len());
        let mut picked_columns = Vec::with_capacity(labels.len());

        for label in labels {
            let label = label.as_ref();
            let idx = self
                .position(label)
                .ok_or_else(|| TrendError::UnknownTopic(label.to_string()))?;
            picked_labels.push(self.labels[idx].clone());
            picked_columns.push(self.columns[idx].clone());
        }

        Ok(Self {
            year: self.year.clone(),
            labels: picked_labels,
            columns: picked_columns,
        })
    }

    /// Reshape into long form, one record per topic × year
    ///
    /// Records are grouped by topic (all years of the first topic, then the
    /// next), years in table order.
    #[must_use]
    pub fn to_long(&self) -> Vec<LongRecord> {
        self.topics()
            .flat_map(|(label, column)| {
                self.year
                    .iter()
                    .zip(column)
                    .map(move |(&year, &value)| LongRecord {
                        year,
                        topic: label.to_string(),
                        value,
                    })
            })
            .collect()
    }
}

/// Per-document topic proportions as produced by an LDA fit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopics {
    /// Document identifiers, one per row (empty strings if the input had none)
    pub ids: Vec<String>,

    /// Year and topic columns
    pub table: TopicTable,
}

impl DocumentTopics {
    /// Create from ids and a table of the same height
    ///
    /// # Errors
    /// Returns [`TrendError::ShapeMismatch`] if `ids` and the table differ in length.
    pub fn new(ids: Vec<String>, table: TopicTable) -> Result<Self, TrendError> {
        if ids.len() != table.len() {
            return Err(TrendError::ShapeMismatch {
                expected: table.len(),
                actual: ids.len(),
            });
        }
        Ok(Self { ids, table })
    }

    /// Number of documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if there are no documents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Correlation of one topic's smoothed proportion with year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRecord {
    /// Pearson correlation coefficient (`NaN` when undefined)
    pub correlation: f64,

    /// Two-sided p-value (1.0 when the correlation is undefined)
    pub p_value: f64,

    /// Topic column label
    pub topic_label: String,

    /// 1-based position among the topic columns
    pub topic_index: usize,
}

impl CorrelationRecord {
    /// Whether the correlation could be computed
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.correlation.is_finite()
    }
}

/// One `(year, topic, value)` observation for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub year: f64,
    pub topic: String,
    pub value: f64,
}
