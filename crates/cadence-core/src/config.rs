use clap::Parser;
use std::path::PathBuf;

use crate::normalize::DEFAULT_PRODUCT_MAP;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Delivery cadence analysis for fuel delivery logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "delivery-cadence",
    about = "Normalize delivery-log spreadsheets and forecast delivery cadence",
    version
)]
pub struct Settings {
    /// Directory scanned (recursively) for CSV source units
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory the report files are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Operating year assumed when a date is inferred from a unit name
    #[arg(long, default_value_t = 2025)]
    pub year: i32,

    /// File name for the normalized raw-record output
    #[arg(long, default_value = "delivery_records.csv")]
    pub records_file: String,

    /// File name for the cadence-summary output
    #[arg(long, default_value = "cadence_summary.csv")]
    pub summary_file: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── PipelineConfig ─────────────────────────────────────────────────────────────

/// Explicit configuration handed into the ingestion pipeline.
///
/// Carries everything that used to be a hidden constant: the operating year
/// for name-based date inference and the ordered product-mapping table.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Year combined with month/day tokens extracted from unit names.
    pub operating_year: i32,
    /// Ordered (pattern, canonical) pairs; first substring match wins.
    pub product_map: Vec<(String, String)>,
}

impl PipelineConfig {
    /// Build a config with the built-in product map.
    pub fn new(operating_year: i32) -> Self {
        Self {
            operating_year,
            product_map: DEFAULT_PRODUCT_MAP
                .iter()
                .map(|(pattern, canonical)| (pattern.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// Derive the pipeline config from CLI settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.year)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(2025)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
