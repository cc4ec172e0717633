use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ondo::analytics::YearAxis;
use ondo::chart::ImageFormat;
use ondo::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "ondo",
    version,
    about = "Find hot and cold topics in LDA topic proportions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank topics by trend, render hot/cold charts and export tables
    Analyze {
        /// Per-document topic proportions (CSV with year, id, topic columns)
        input: PathBuf,

        /// Maximum p-value for a topic to count as trending
        #[arg(short, long)]
        pval: Option<f64>,

        /// Moving-average window in years
        #[arg(short, long)]
        window: Option<usize>,

        /// Topics to select per direction
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Legend font size
        #[arg(long)]
        legend_font_size: Option<u32>,

        /// Year axis handling (smoothed, raw)
        #[arg(long)]
        year_axis: Option<String>,

        /// Chart format (svg, png)
        #[arg(long)]
        format: Option<String>,

        /// Output directory for charts and tables
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long, default_value = "false")]
        no_charts: bool,

        /// Skip writing result tables
        #[arg(long, default_value = "false")]
        no_tables: bool,

        /// Print the selected correlations as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the correlation of every topic with year
    Correlate {
        /// Per-document topic proportions (CSV)
        input: PathBuf,

        /// Moving-average window in years
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Print the effective configuration
    ShowConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env();
            config
        }
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Analyze {
            input,
            pval,
            window,
            top_n,
            legend_font_size,
            year_axis,
            format,
            output,
            no_charts,
            no_tables,
            json,
        } => {
            if let Some(pval) = pval {
                config.analysis.pval_threshold = pval;
            }
            if let Some(window) = window {
                config.analysis.moving_average_window = window;
            }
            if let Some(top_n) = top_n {
                config.analysis.top_n = top_n;
            }
            if let Some(size) = legend_font_size {
                config.chart.legend_font_size = size;
            }
            if let Some(axis) = year_axis {
                config.analysis.year_axis = YearAxis::parse(&axis)
                    .with_context(|| format!("Unknown year axis: {axis}"))?;
            }
            if let Some(format) = format {
                config.chart.format = ImageFormat::parse(&format)
                    .with_context(|| format!("Unknown chart format: {format}"))?;
            }
            if let Some(output) = output {
                config.output.directory = output;
            }
            config.chart.enabled &= !no_charts;
            config.output.write_tables &= !no_tables;
            config.validate()?;

            tracing::info!(
                input = %input.display(),
                pval = %config.analysis.pval_threshold,
                window = %config.analysis.moving_average_window,
                top_n = %config.analysis.top_n,
                output = %config.output.directory.display(),
                "Starting analyze command"
            );
            commands::analyze(&config, commands::AnalyzeParams { input, json })?;
        }

        Commands::Correlate { input, window } => {
            if let Some(window) = window {
                config.analysis.moving_average_window = window;
            }
            config.validate()?;

            tracing::info!(
                input = %input.display(),
                window = %config.analysis.moving_average_window,
                "Starting correlate command"
            );
            commands::correlate(&config, &input)?;
        }

        Commands::ShowConfig => commands::show_config(&config)?,
    }

    tracing::debug!("ondo completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("ondo=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("ondo={level},warn"))
            .context("Invalid log level")?
    };

    // Logs go to stderr so command output on stdout stays clean
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
