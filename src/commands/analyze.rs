use anyhow::{Context, Result};
use std::path::PathBuf;

use ondo::analytics::{analyze as run_analysis, render_charts};
use ondo::chart::{ChartRenderer, NoopRenderer, PlottersRenderer};
use ondo::config::Config;
use ondo::models::CorrelationRecord;
use ondo::parser::load_topic_proportions;
use ondo::storage::ResultWriter;

/// Inputs of the `analyze` command after config and flags are merged
pub struct AnalyzeParams {
    pub input: PathBuf,
    pub json: bool,
}

pub fn analyze(config: &Config, params: AnalyzeParams) -> Result<()> {
    let docs = load_topic_proportions(&params.input)
        .with_context(|| format!("Failed to load {}", params.input.display()))?;

    let options = config.analysis_options();
    let output_dir = &config.output.directory;

    let plotters;
    let renderer: &dyn ChartRenderer = if config.chart.enabled {
        plotters = PlottersRenderer::new(
            output_dir,
            config.chart.format,
            config.chart.width,
            config.chart.height,
        );
        &plotters
    } else {
        &NoopRenderer
    };

    let result = run_analysis(&docs, &options).context("Analysis failed")?;

    // Tables first, so a chart backend failure still leaves the results on disk
    if config.output.write_tables {
        ResultWriter::new(output_dir)
            .write_all(&result)
            .context("Failed to write result tables")?;
    }

    render_charts(&result, options.legend_font_size, renderer)
        .context("Failed to render charts")?;

    tracing::info!(
        hot = %result.positive_correlations.len(),
        cold = %result.negative_correlations.len(),
        topics = %result.correlations.len(),
        "Hot and cold topic analysis complete"
    );

    if params.json {
        let summary = serde_json::json!({
            "top5_pos_cor": result.positive_correlations,
            "top5_neg_cor": result.negative_correlations,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Hot and Cold Topics");
    println!("===================");
    println!("  Documents: {}", docs.len());
    println!("  Topics: {}", docs.table.topic_count());
    println!("  Smoothed years: {}", result.smoothed.len());
    println!(
        "  Window: {} | p-value threshold: {}",
        options.moving_average_window, options.pval_threshold
    );

    print_section("Hot topics (positive trend)", &result.positive_correlations);
    print_section("Cold topics (negative trend)", &result.negative_correlations);

    if config.chart.enabled || config.output.write_tables {
        println!("\nOutput written to {}", output_dir.display());
    }

    Ok(())
}

fn print_section(title: &str, records: &[CorrelationRecord]) {
    println!("\n{title}:");
    if records.is_empty() {
        println!("  (none significant)");
        return;
    }
    for record in records {
        println!(
            "  #{:<3} {:<24} r = {:>7.4}  p = {:.2e}",
            record.topic_index, record.topic_label, record.correlation, record.p_value
        );
    }
}
