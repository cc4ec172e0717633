//! Parsing of per-document topic proportion tables
//!
//! Input is a CSV file with a header row: a required `year` column, an
//! optional `id` column, and one column per topic. Topic columns keep their
//! header order; the header is the topic label.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::analytics::TrendError;
use crate::error::{Error, Result};
use crate::models::{DocumentTopics, TopicTable};

/// Name of the required year column
pub const YEAR_COLUMN: &str = "year";

/// Name of the optional document id column
pub const ID_COLUMN: &str = "id";

/// Read topic proportions from a CSV file
///
/// # Errors
/// Fails if the file cannot be opened or its content is invalid
/// (see [`parse_topic_proportions`]).
pub fn load_topic_proportions<P: AsRef<Path>>(path: P) -> Result<DocumentTopics> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::with_source(format!("Failed to open input file: {}", path.display()), e)
    })?;

    let docs = parse_topic_proportions(file)?;
    tracing::info!(
        path = %path.display(),
        documents = %docs.len(),
        topics = %docs.table.topic_count(),
        "Loaded topic proportions"
    );
    Ok(docs)
}

/// Parse topic proportions from any CSV reader
///
/// Empty topic cells are read as missing values (`NaN`).
///
/// # Errors
/// - [`TrendError::MissingYearColumn`] if there is no `year` header
/// - [`TrendError::NonNumericYear`] if a year is empty, not a number, or not finite
/// - [`Error::Other`] if a topic cell is not a number
/// - [`Error::Csv`] for malformed CSV (e.g. ragged rows)
pub fn parse_topic_proportions<R: Read>(reader: R) -> Result<DocumentTopics> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let year_idx = headers
        .iter()
        .position(|h| h == YEAR_COLUMN)
        .ok_or(TrendError::MissingYearColumn)?;
    let id_idx = headers.iter().position(|h| h == ID_COLUMN);

    let topic_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != year_idx && Some(*idx) != id_idx)
        .map(|(idx, h)| (idx, h.to_string()))
        .collect();

    let mut ids = Vec::new();
    let mut years = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); topic_cols.len()];

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;

        let raw_year = record.get(year_idx).unwrap_or_default();
        let year = raw_year
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite())
            .ok_or_else(|| TrendError::NonNumericYear {
                row,
                value: raw_year.to_string(),
            })?;
        years.push(year);

        let id = match id_idx {
            Some(idx) => record.get(idx).unwrap_or_default().to_string(),
            None => row.to_string(),
        };
        ids.push(id);

        for ((col_idx, label), column) in topic_cols.iter().zip(columns.iter_mut()) {
            let cell = record.get(*col_idx).unwrap_or_default();
            column.push(parse_proportion(cell).ok_or_else(|| {
                Error::other(format!(
                    "Non-numeric value {cell:?} for topic {label} at row {row}"
                ))
            })?);
        }
    }

    let labels = topic_cols.into_iter().map(|(_, label)| label).collect();
    let table = TopicTable::new(years, labels, columns)?;
    Ok(DocumentTopics::new(ids, table)?)
}

fn parse_proportion(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("na") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}
