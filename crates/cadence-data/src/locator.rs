//! Header-row and column discovery inside an untyped cell grid.
//!
//! Export layouts vary: title banners, blank spacer rows, and date lines can
//! all precede the real table. The locator scans top-down for the first row
//! that names both the customer and product columns, then resolves the three
//! required logical fields by keyword containment over the title-cased
//! column names.

use cadence_core::error::UnitSkipReason;

/// Indexes of the three required logical columns within a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub customer: usize,
    pub product: usize,
    pub quantity: usize,
}

/// The located table: the header row index and the resolved columns.
/// Data rows are everything strictly below `header_row`.
#[derive(Debug, Clone, Copy)]
pub struct TableLocation {
    pub header_row: usize,
    pub columns: ColumnMap,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Locate the header row and resolve the required columns.
///
/// The header is the first row (top-down) whose concatenated case-folded
/// text contains both `"customer name"` and `"product"`. First match wins.
pub fn locate_table(grid: &[Vec<String>]) -> Result<TableLocation, UnitSkipReason> {
    let header_row = find_header_row(grid).ok_or(UnitSkipReason::HeaderNotFound)?;
    let names = column_names(&grid[header_row]);
    let columns = resolve_columns(&names)?;
    Ok(TableLocation {
        header_row,
        columns,
    })
}

/// Resolve the three logical fields by substring containment over
/// title-cased column names, scanning columns in order.
///
/// `quantity` accepts a column containing either `Gallons` or `Qty`, with
/// `Gallons` checked first for each candidate.
pub fn resolve_columns(names: &[String]) -> Result<ColumnMap, UnitSkipReason> {
    let customer = names
        .iter()
        .position(|name| name.contains("Customer"))
        .ok_or(UnitSkipReason::RequiredColumnMissing("customer"))?;
    let product = names
        .iter()
        .position(|name| name.contains("Product"))
        .ok_or(UnitSkipReason::RequiredColumnMissing("product"))?;
    let quantity = names
        .iter()
        .position(|name| name.contains("Gallons") || name.contains("Qty"))
        .ok_or(UnitSkipReason::RequiredColumnMissing("quantity"))?;

    Ok(ColumnMap {
        customer,
        product,
        quantity,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// First row whose joined, lowercased text mentions both required columns.
fn find_header_row(grid: &[Vec<String>]) -> Option<usize> {
    grid.iter().position(|row| {
        let text = row.join(" ").to_lowercase();
        text.contains("customer name") && text.contains("product")
    })
}

/// Trim and title-case the header cells into canonical column names.
fn column_names(header: &[String]) -> Vec<String> {
    header.iter().map(|cell| title_case(cell.trim())).collect()
}

/// Title-case in the word-boundary sense: the first letter after any
/// non-alphabetic character is uppercased, the rest lowercased, so
/// `"CUSTOMER NAME"` becomes `"Customer Name"`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
