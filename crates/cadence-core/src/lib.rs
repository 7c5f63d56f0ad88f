//! Core domain logic for the delivery-cadence analyzer.
//!
//! Pure types and functions with no file I/O: the record and summary models,
//! the error taxonomy, date resolution, field normalization, and the
//! configuration passed into the ingestion pipeline.

pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod normalize;
