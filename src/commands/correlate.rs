use anyhow::{Context, Result};
use std::path::Path;

use ondo::analytics::{aggregate_by_year, correlation_table, trailing_moving_average};
use ondo::config::Config;
use ondo::parser::load_topic_proportions;

/// Print the correlation of every topic with year, without selection
pub fn correlate(config: &Config, input: &Path) -> Result<()> {
    let docs = load_topic_proportions(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let yearly = aggregate_by_year(&docs)?;
    let smoothed = trailing_moving_average(
        &yearly,
        config.analysis.moving_average_window,
        config.analysis.year_axis,
    )?;

    let mut records = correlation_table(&smoothed);
    records.sort_by(|a, b| {
        b.is_defined()
            .cmp(&a.is_defined())
            .then(b.correlation.total_cmp(&a.correlation))
    });

    println!("Topic correlations with year ({} smoothed years)", smoothed.len());
    println!("================================================");
    for record in records {
        let marker = if !record.is_defined() {
            "undefined"
        } else if record.p_value <= config.analysis.pval_threshold {
            "significant"
        } else {
            ""
        };
        println!(
            "  #{:<3} {:<24} r = {:>7.4}  p = {:.2e}  {marker}",
            record.topic_index, record.topic_label, record.correlation, record.p_value
        );
    }

    Ok(())
}
