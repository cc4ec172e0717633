pub mod analyze;
pub mod correlate;
pub mod show_config;

// Re-export command functions for convenience
pub use analyze::{analyze, AnalyzeParams};
pub use correlate::correlate;
pub use show_config::show_config;
