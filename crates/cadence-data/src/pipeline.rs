//! Ingestion pipeline: one unit in, zero or more normalized records out.
//!
//! Composes date resolution, table location, and field normalization per
//! unit, isolating every failure at the unit or row boundary: a bad unit is
//! skipped and logged, a bad row is counted and skipped, and the run carries
//! on. The merged output preserves unit-discovery order.

use std::path::Path;

use cadence_core::config::PipelineConfig;
use cadence_core::dates::resolve_unit_date;
use cadence_core::error::{CadenceError, Result, RowRejection, UnitSkipReason};
use cadence_core::models::DeliveryRecord;
use cadence_core::normalize::{canonicalize_product, normalize_customer, parse_gallons};
use tracing::{debug, warn};

use crate::locator::{locate_table, ColumnMap};
use crate::source::{find_csv_files, load_unit, SourceUnit};

// ── Run outcome ───────────────────────────────────────────────────────────────

/// Per-reason counts of rows rejected during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub accepted: usize,
    pub blank_customer: usize,
    pub control_label: usize,
    pub blank_product: usize,
    pub unparseable_quantity: usize,
    pub non_positive_quantity: usize,
}

impl RowStats {
    fn record_rejection(&mut self, rejection: RowRejection) {
        match rejection {
            RowRejection::BlankCustomer => self.blank_customer += 1,
            RowRejection::ControlLabel => self.control_label += 1,
            RowRejection::BlankProduct => self.blank_product += 1,
            RowRejection::UnparseableQuantity => self.unparseable_quantity += 1,
            RowRejection::NonPositiveQuantity => self.non_positive_quantity += 1,
        }
    }

    /// Total rejected rows across all reasons.
    pub fn rejected(&self) -> usize {
        self.blank_customer
            + self.control_label
            + self.blank_product
            + self.unparseable_quantity
            + self.non_positive_quantity
    }

    fn merge(&mut self, other: RowStats) {
        self.accepted += other.accepted;
        self.blank_customer += other.blank_customer;
        self.control_label += other.control_label;
        self.blank_product += other.blank_product;
        self.unparseable_quantity += other.unparseable_quantity;
        self.non_positive_quantity += other.non_positive_quantity;
    }
}

/// The complete result of ingesting a directory of units.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Accepted records, concatenated in unit-discovery order.
    pub records: Vec<DeliveryRecord>,
    /// Units that produced records (or legitimately produced zero rows).
    pub units_processed: usize,
    /// Units skipped entirely, with the reason.
    pub units_skipped: Vec<(String, UnitSkipReason)>,
    /// Row-level accept/reject statistics across all processed units.
    pub row_stats: RowStats,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Ingest every CSV unit under `data_dir`.
///
/// Unit-level failures (unreadable file, unresolved date, missing header or
/// column) skip only that unit. The only hard error is a missing data
/// directory; a run with zero accepted records is reported through
/// [`IngestReport`] and judged by the caller.
pub fn ingest_directory(data_dir: &Path, config: &PipelineConfig) -> Result<IngestReport> {
    if !data_dir.exists() {
        return Err(CadenceError::DataPathNotFound(data_dir.to_path_buf()));
    }

    let files = find_csv_files(data_dir);
    let mut report = IngestReport::default();

    for path in &files {
        let unit = match load_unit(path) {
            Ok(unit) => unit,
            Err(reason) => {
                warn!("Skipping unit {}: {}", path.display(), reason);
                report
                    .units_skipped
                    .push((path.display().to_string(), reason));
                continue;
            }
        };

        match process_unit(&unit, config) {
            Ok((records, stats)) => {
                debug!(
                    "Unit {}: {} accepted, {} rejected",
                    unit.name,
                    stats.accepted,
                    stats.rejected()
                );
                report.units_processed += 1;
                report.row_stats.merge(stats);
                report.records.extend(records);
            }
            Err(reason) => {
                warn!("Skipping unit {}: {}", unit.name, reason);
                report.units_skipped.push((unit.name.clone(), reason));
            }
        }
    }

    debug!(
        "Ingested {} records from {} units ({} skipped)",
        report.records.len(),
        report.units_processed,
        report.units_skipped.len()
    );

    Ok(report)
}

/// Run the full per-unit pipeline: resolve the date, locate the table, and
/// normalize every data row into a record or a counted rejection.
pub fn process_unit(
    unit: &SourceUnit,
    config: &PipelineConfig,
) -> std::result::Result<(Vec<DeliveryRecord>, RowStats), UnitSkipReason> {
    let date = resolve_unit_date(&unit.grid, &unit.name, config.operating_year)
        .ok_or(UnitSkipReason::DateUnresolved)?;
    let table = locate_table(&unit.grid)?;

    let mut records = Vec::new();
    let mut stats = RowStats::default();

    for row in &unit.grid[table.header_row + 1..] {
        match normalize_row(row, table.columns, date, &unit.name, config) {
            Ok(record) => {
                stats.accepted += 1;
                records.push(record);
            }
            Err(rejection) => stats.record_rejection(rejection),
        }
    }

    Ok((records, stats))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Normalize one data row into a [`DeliveryRecord`] or a rejection reason.
fn normalize_row(
    row: &[String],
    columns: ColumnMap,
    date: chrono::NaiveDate,
    provenance: &str,
    config: &PipelineConfig,
) -> std::result::Result<DeliveryRecord, RowRejection> {
    let customer = normalize_customer(cell(row, columns.customer))?;
    let product = canonicalize_product(cell(row, columns.product), &config.product_map)?;
    let gallons = parse_gallons(cell(row, columns.quantity))?;

    Ok(DeliveryRecord {
        date,
        customer,
        product,
        gallons,
        provenance: provenance.to_string(),
    })
}

/// Cell accessor tolerant of ragged rows: out-of-range reads as empty.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
