//! Yearly aggregation of per-document topic proportions

use crate::models::{DocumentTopics, TopicTable};

use super::error::TrendResult;

/// Average every topic column over the documents of each year
///
/// Rows of the result are the distinct years of the input in ascending
/// order. Missing (`NaN`) cells are skipped; a year with no present value
/// for a topic averages to `NaN`. Document ids take no part.
///
/// # Arguments
/// * `docs` - Per-document topic proportions
///
/// # Returns
/// One row per distinct year with the mean proportion of each topic
pub fn aggregate_by_year(docs: &DocumentTopics) -> TrendResult<TopicTable> {
    let table = &docs.table;
    let labels = table.labels().to_vec();

    if table.is_empty() {
        return Ok(TopicTable::empty(labels));
    }

    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| table.year()[a].total_cmp(&table.year()[b]));

    // Consecutive runs of equal years in sorted order form the groups
    let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
    for idx in order {
        let year = table.year()[idx];
        if let Some((current, members)) = groups.last_mut() {
            if *current == year {
                members.push(idx);
                continue;
            }
        }
        groups.push((year, vec![idx]));
    }

    let years: Vec<f64> = groups.iter().map(|(year, _)| *year).collect();
    let columns: Vec<Vec<f64>> = table
        .columns()
        .iter()
        .map(|column| {
            groups
                .iter()
                .map(|(_, members)| mean_present(members.iter().map(|&i| column[i])))
                .collect()
        })
        .collect();

    tracing::debug!(
        documents = %docs.len(),
        years = %years.len(),
        topics = %labels.len(),
        "Aggregated topic proportions by year"
    );

    TopicTable::new(years, labels, columns)
}

/// Mean of the non-`NaN` values, `NaN` if there are none
///
/// Running mean, so a group of identical values averages to exactly that value.
fn mean_present<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (mean, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(mean, count), v| {
            let count = count + 1;
            (mean + (v - mean) / count as f64, count)
        });

    if count == 0 {
        f64::NAN
    } else {
        mean
    }
}
