//! Integration tests module
//!
//! End-to-end tests of the hot/cold topic pipeline, from CSV input to the
//! exported tables.

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
