//! Ingestion and analysis layer for the delivery-cadence analyzer.
//!
//! Responsible for discovering and reading CSV source units, locating the
//! real table inside each grid, running the normalization pipeline, grouping
//! the merged record set into cadence summaries, and writing the report
//! files.

pub mod analyzer;
pub mod locator;
pub mod pipeline;
pub mod report;
pub mod source;

pub use cadence_core as core;
