//! CSV report output: the normalized raw-record file and the cadence
//! summary file.
//!
//! Both files are plain CSV with fixed header rows; dates serialize as
//! `YYYY-MM-DD` and absent values as `N/A`.

use std::path::{Path, PathBuf};

use cadence_core::error::{CadenceError, Result};
use cadence_core::models::{CadenceSummary, DeliveryRecord};
use serde::Serialize;
use tracing::info;

/// One row of the summary report, shaped exactly like the output schema.
#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "Customer")]
    customer: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Frequency")]
    frequency: String,
    #[serde(rename = "Avg Interval (Days)")]
    avg_interval_days: f64,
    #[serde(rename = "Pattern Day")]
    pattern_day: String,
    #[serde(rename = "Last Delivery")]
    last_delivery: String,
    #[serde(rename = "Forecasted Date")]
    forecasted_date: String,
    #[serde(rename = "Total Deliveries")]
    total_deliveries: usize,
    #[serde(rename = "Total Gallons")]
    total_gallons: f64,
}

impl From<&CadenceSummary> for SummaryRow {
    fn from(summary: &CadenceSummary) -> Self {
        SummaryRow {
            customer: summary.customer.clone(),
            product: summary.product.clone(),
            frequency: summary.frequency.label(),
            avg_interval_days: summary.avg_interval_reported(),
            pattern_day: summary.pattern_day_label(),
            last_delivery: summary.last_delivery.format("%Y-%m-%d").to_string(),
            forecasted_date: summary.forecasted_date_label(),
            total_deliveries: summary.total_deliveries,
            total_gallons: summary.total_gallons,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Write both report files into `output_dir`, creating it if needed.
///
/// Returns the paths of the written (records, summary) files.
pub fn write_reports(
    records: &[DeliveryRecord],
    summaries: &[CadenceSummary],
    output_dir: &Path,
    records_file: &str,
    summary_file: &str,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)?;

    let records_path = output_dir.join(records_file);
    write_records(&records_path, records)?;

    let summary_path = output_dir.join(summary_file);
    write_summaries(&summary_path, summaries)?;

    info!(
        "Wrote {} records and {} summaries to {}",
        records.len(),
        summaries.len(),
        output_dir.display()
    );

    Ok((records_path, summary_path))
}

/// Write the normalized raw-record file
/// (`Date, Customer, Product, Gallons, Source_File`).
pub fn write_records(path: &Path, records: &[DeliveryRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| report_error(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| report_error(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the cadence summary file (`Customer, Product, Frequency, ...`).
pub fn write_summaries(path: &Path, summaries: &[CadenceSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| report_error(path, e))?;
    for summary in summaries {
        writer
            .serialize(SummaryRow::from(summary))
            .map_err(|e| report_error(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

fn report_error(path: &Path, error: csv::Error) -> CadenceError {
    CadenceError::ReportWrite {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
