//! Configuration management for ondo
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Command-line flags override both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::hot_cold::{
    DEFAULT_LEGEND_FONT_SIZE, DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_PVAL_THRESHOLD,
    DEFAULT_TOP_N,
};
use crate::analytics::{AnalysisOptions, YearAxis};
use crate::chart::ImageFormat;
use crate::error::Error;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis parameters
    pub analysis: AnalysisConfig,

    /// Chart rendering configuration
    pub chart: ChartConfig,

    /// Result export configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum p-value for a topic to count as trending
    pub pval_threshold: f64,

    /// Trailing moving-average window, in years
    pub moving_average_window: usize,

    /// Topics selected per direction
    pub top_n: usize,

    /// Whether the year column is smoothed along with the topics
    pub year_axis: YearAxis,
}

/// Chart rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Render charts at all
    pub enabled: bool,

    /// Legend font size
    pub legend_font_size: u32,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Image format (svg, png)
    pub format: ImageFormat,
}

/// Result export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for charts and tables
    pub directory: PathBuf,

    /// Write the result tables as CSV/JSON
    pub write_tables: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pval_threshold: DEFAULT_PVAL_THRESHOLD,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            top_n: DEFAULT_TOP_N,
            year_axis: YearAxis::Smoothed,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            legend_font_size: DEFAULT_LEGEND_FONT_SIZE,
            width: 1024,
            height: 640,
            format: ImageFormat::Svg,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            write_tables: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Override fields from `ONDO_*` environment variables
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("ONDO_PVAL_THRESHOLD") {
            self.analysis.pval_threshold = v;
        }
        if let Some(v) = env_parse("ONDO_MOVING_AVERAGE_WINDOW") {
            self.analysis.moving_average_window = v;
        }
        if let Some(v) = env_parse("ONDO_TOP_N") {
            self.analysis.top_n = v;
        }
        if let Some(v) = std::env::var("ONDO_YEAR_AXIS").ok().and_then(|v| YearAxis::parse(&v)) {
            self.analysis.year_axis = v;
        }
        if let Some(v) = env_parse("ONDO_LEGEND_FONT_SIZE") {
            self.chart.legend_font_size = v;
        }
        if let Some(v) = std::env::var("ONDO_CHART_FORMAT").ok().and_then(|v| ImageFormat::parse(&v)) {
            self.chart.format = v;
        }
        if let Ok(v) = std::env::var("ONDO_OUTPUT_DIR") {
            self.output.directory = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("ONDO_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = std::env::var("ONDO_LOG_FORMAT") {
            self.logging.format = v;
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first invalid value.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.analysis.moving_average_window == 0 {
            return Err(Error::config("moving_average_window must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.analysis.pval_threshold) {
            return Err(Error::config("pval_threshold must be within 0..=1"));
        }

        if self.analysis.top_n == 0 {
            return Err(Error::config("top_n must be greater than 0"));
        }

        if self.chart.legend_font_size == 0 {
            return Err(Error::config("legend_font_size must be greater than 0"));
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::config("chart width and height must be greater than 0"));
        }

        Ok(())
    }

    /// Analysis options for the pipeline
    #[must_use]
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            pval_threshold: self.analysis.pval_threshold,
            moving_average_window: self.analysis.moving_average_window,
            legend_font_size: self.chart.legend_font_size,
            top_n: self.analysis.top_n,
            year_axis: self.analysis.year_axis,
        }
    }
}
