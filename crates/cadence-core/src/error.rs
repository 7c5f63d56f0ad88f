use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the delivery-cadence crates.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// The configured input directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No delivery record survived ingestion across all units.
    ///
    /// This is the single run-level terminal condition: when it is raised
    /// no summary or report output is generated.
    #[error("No valid delivery data found in {0}")]
    NoValidData(PathBuf),

    /// A report file could not be written.
    #[error("Failed to write report {path}: {message}")]
    ReportWrite { path: PathBuf, message: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the cadence crates.
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Why an entire input unit (one file or sheet) was skipped.
///
/// Every variant is non-fatal: the pipeline logs the reason, records it in
/// the run outcome, and continues with the next unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitSkipReason {
    /// No date could be resolved from the grid content or the unit name.
    #[error("no resolvable date in content or unit name")]
    DateUnresolved,

    /// No row contained both "customer name" and "product".
    #[error("no header row containing 'customer name' and 'product'")]
    HeaderNotFound,

    /// The header row was found but a required column is absent.
    #[error("missing required column: {0}")]
    RequiredColumnMissing(&'static str),

    /// The unit could not be read or parsed at all (corrupt source).
    #[error("failed to read unit: {0}")]
    ReadFailure(String),
}

/// Why a single data row was rejected during normalization.
///
/// Rejection is an expected outcome, not an error: rejected rows are counted
/// and the unit keeps processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRejection {
    /// Customer cell is empty or the textual missing-value marker.
    BlankCustomer,
    /// Customer cell is a subtotal/control label (TOTAL, GRAND TOTAL, NONE,
    /// or anything containing SUM OF).
    ControlLabel,
    /// Product cell is empty after trimming.
    BlankProduct,
    /// Quantity cell did not parse as a number.
    UnparseableQuantity,
    /// Quantity parsed but is zero, negative, or NaN.
    NonPositiveQuantity,
}

impl RowRejection {
    /// Short stable label used in skip-statistics logging.
    pub fn label(&self) -> &'static str {
        match self {
            RowRejection::BlankCustomer => "blank customer",
            RowRejection::ControlLabel => "control label",
            RowRejection::BlankProduct => "blank product",
            RowRejection::UnparseableQuantity => "unparseable quantity",
            RowRejection::NonPositiveQuantity => "non-positive quantity",
        }
    }
}
