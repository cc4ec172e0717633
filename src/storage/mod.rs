//! Export of analysis results as CSV and JSON files

use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

use crate::analytics::HotColdTopics;
use crate::error::{Error, Result};
use crate::models::{CorrelationRecord, LongRecord, TopicTable};

/// JSON summary of a run
#[derive(Debug, Serialize)]
struct Summary<'a> {
    top5_pos_cor: &'a [CorrelationRecord],
    top5_neg_cor: &'a [CorrelationRecord],
    top5_positive: &'a TopicTable,
    top5_negative: &'a TopicTable,
}

/// Writes the tables of a [`HotColdTopics`] result into a directory
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// Create a writer for `output_dir` (created on first write)
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write every result table; returns the paths written
    ///
    /// # Errors
    /// Fails if the directory cannot be created or a file cannot be written.
    pub fn write_all(&self, result: &HotColdTopics) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::with_source(
                format!("Failed to create output directory: {}", self.output_dir.display()),
                e,
            )
        })?;

        let written = vec![
            self.write_wide("top_positive.csv", &result.top_positive)?,
            self.write_wide("top_negative.csv", &result.top_negative)?,
            self.write_long("top_positive_long.csv", &result.positive_long())?,
            self.write_long("top_negative_long.csv", &result.negative_long())?,
            self.write_correlations("correlations.csv", &result.correlations)?,
            self.write_summary("summary.json", result)?,
        ];

        tracing::info!(
            dir = %self.output_dir.display(),
            files = %written.len(),
            "Result tables written"
        );
        Ok(written)
    }

    /// Write a wide table: `year` then one column per topic
    pub fn write_wide(&self, name: &str, table: &TopicTable) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        let mut writer = csv::Writer::from_path(&path)?;

        let mut header = vec!["year".to_string()];
        header.extend(table.labels().iter().cloned());
        writer.write_record(&header)?;

        for idx in 0..table.len() {
            let mut row = vec![table.year()[idx].to_string()];
            row.extend(table.columns().iter().map(|c| c[idx].to_string()));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(path)
    }

    /// Write long-form `(year, topic, value)` records
    pub fn write_long(&self, name: &str, records: &[LongRecord]) -> Result<PathBuf> {
        self.write_records(name, records, &["year", "topic", "value"])
    }

    /// Write correlation records
    pub fn write_correlations(&self, name: &str, records: &[CorrelationRecord]) -> Result<PathBuf> {
        self.write_records(
            name,
            records,
            &["correlation", "p_value", "topic_label", "topic_index"],
        )
    }

    /// Serialize records with an explicit header, so an empty table
    /// still produces a header row
    fn write_records<T: Serialize>(&self, name: &str, records: &[T], header: &[&str]) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;

        writer.write_record(header)?;
        for record in records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(path)
    }

    fn write_summary(&self, name: &str, result: &HotColdTopics) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        let summary = Summary {
            top5_pos_cor: &result.positive_correlations,
            top5_neg_cor: &result.negative_correlations,
            top5_positive: &result.top_positive,
            top5_negative: &result.top_negative,
        };

        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &summary)?;
        Ok(path)
    }
}
