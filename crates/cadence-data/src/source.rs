//! Source-unit discovery and grid loading.
//!
//! A unit is one CSV file read as an untyped 2-D grid of string cells, with
//! no assumed schema: header location and date placement are resolved
//! downstream. This single grid-shaped abstraction serves both plain CSV
//! exports and per-sheet workbook exports.

use std::path::{Path, PathBuf};

use cadence_core::error::UnitSkipReason;
use tracing::warn;

/// One input unit: an untyped cell grid plus the name it was discovered under.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// File name (provenance identifier and date-inference fallback).
    pub name: String,
    /// Raw cells, row-major; rows may be ragged.
    pub grid: Vec<Vec<String>>,
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
///
/// The sort gives every run a stable unit order, which keeps the merged
/// record sequence reproducible.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Read one CSV file into a [`SourceUnit`].
///
/// The reader is headerless and flexible: every line becomes a row of string
/// cells regardless of width, so subtotal banners and title rows survive for
/// the table locator to reason about. Read or parse failures surface as
/// [`UnitSkipReason::ReadFailure`] so the caller can skip just this unit.
pub fn load_unit(path: &Path) -> Result<SourceUnit, UnitSkipReason> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| UnitSkipReason::ReadFailure(e.to_string()))?;

    let mut grid: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| UnitSkipReason::ReadFailure(e.to_string()))?;
        grid.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(SourceUnit { name, grid })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
