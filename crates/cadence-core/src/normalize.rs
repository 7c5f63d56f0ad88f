//! Field-level canonicalization for one data row.
//!
//! Customer, product, and quantity cells arrive as free text. Each function
//! either produces a canonical value or a [`RowRejection`] so callers can
//! count skips instead of swallowing them.

use crate::error::RowRejection;

/// Ordered (pattern, canonical) product mapping, first substring match wins.
///
/// The order is load-bearing: the dyed-diesel patterns sit ahead of the bare
/// `LD` code so that already-canonical codes map back to themselves. Short
/// codes can still match inside longer unrelated raw strings; that risk is
/// accepted rather than hidden behind longest-match logic.
pub const DEFAULT_PRODUCT_MAP: [(&str, &str); 8] = [
    ("LD-DYED", "LD-Dyed"),
    ("LD - DYED", "LD-Dyed"),
    ("RED DIESEL", "LD-Dyed"),
    ("CLEAR DIESEL", "LD"),
    ("UNLEADED", "UR"),
    ("LD", "LD"),
    ("UR", "UR"),
    ("LP", "LP"),
];

/// Customer labels that mark subtotal/control rows, never real customers.
const CONTROL_LABELS: [&str; 3] = ["TOTAL", "GRAND TOTAL", "NONE"];

// ── Customer ──────────────────────────────────────────────────────────────────

/// Canonicalize a customer cell: trim, uppercase, reject control rows.
///
/// Rejected cells: empty, the textual missing-value marker `NAN`, the labels
/// in [`CONTROL_LABELS`], and anything containing `SUM OF` (embedded
/// subtotal rows).
pub fn normalize_customer(raw: &str) -> Result<String, RowRejection> {
    let customer = raw.trim().to_uppercase();
    if customer.is_empty() || customer == "NAN" {
        return Err(RowRejection::BlankCustomer);
    }
    if CONTROL_LABELS.contains(&customer.as_str()) || customer.contains("SUM OF") {
        return Err(RowRejection::ControlLabel);
    }
    Ok(customer)
}

// ── Product ───────────────────────────────────────────────────────────────────

/// Canonicalize a product cell against the ordered mapping table.
///
/// The raw text is trimmed and uppercased, then the first pair whose pattern
/// is a substring wins. Unmapped products pass through as the raw uppercased
/// string, so unknown codes still group consistently. An empty cell rejects
/// the row (a record must always carry a product).
pub fn canonicalize_product(
    raw: &str,
    product_map: &[(String, String)],
) -> Result<String, RowRejection> {
    let product = raw.trim().to_uppercase();
    if product.is_empty() {
        return Err(RowRejection::BlankProduct);
    }
    for (pattern, canonical) in product_map {
        if product.contains(pattern.as_str()) {
            return Ok(canonical.clone());
        }
    }
    Ok(product)
}

// ── Quantity ──────────────────────────────────────────────────────────────────

/// Parse a quantity cell into strictly positive gallons.
///
/// Thousands separators are stripped before parsing. Values that do not
/// parse, and parsed values that are zero, negative, or NaN, reject the row.
pub fn parse_gallons(raw: &str) -> Result<f64, RowRejection> {
    let cleaned = raw.trim().replace(',', "");
    let value: f64 = cleaned
        .parse()
        .map_err(|_| RowRejection::UnparseableQuantity)?;
    // NaN fails this comparison too, so a textual "NaN" cell is rejected.
    if value > 0.0 {
        Ok(value)
    } else {
        Err(RowRejection::NonPositiveQuantity)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn default_map() -> Vec<(String, String)> {
        DEFAULT_PRODUCT_MAP
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect()
    }

    // ── normalize_customer ────────────────────────────────────────────────

    #[test]
    fn test_customer_trimmed_and_uppercased() {
        assert_eq!(normalize_customer("  Acme Fuels  ").unwrap(), "ACME FUELS");
    }

    #[test]
    fn test_customer_empty_rejected() {
        assert_eq!(
            normalize_customer("   "),
            Err(RowRejection::BlankCustomer)
        );
    }

    #[test]
    fn test_customer_nan_rejected() {
        assert_eq!(normalize_customer("nan"), Err(RowRejection::BlankCustomer));
    }

    #[test]
    fn test_customer_control_labels_rejected() {
        for label in ["TOTAL", "Grand Total", "none"] {
            assert_eq!(
                normalize_customer(label),
                Err(RowRejection::ControlLabel),
                "label {label:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_customer_sum_of_substring_rejected() {
        assert_eq!(
            normalize_customer("Sum of Gallons by Region"),
            Err(RowRejection::ControlLabel)
        );
    }

    #[test]
    fn test_customer_containing_total_as_word_is_kept() {
        // Only exact control labels are rejected, not names containing them.
        assert_eq!(
            normalize_customer("Total Quality Farms").unwrap(),
            "TOTAL QUALITY FARMS"
        );
    }

    // ── canonicalize_product ──────────────────────────────────────────────

    #[test]
    fn test_product_red_diesel_maps_to_ld_dyed() {
        assert_eq!(
            canonicalize_product("RED DIESEL BULK", &default_map()).unwrap(),
            "LD-Dyed"
        );
    }

    #[test]
    fn test_product_clear_diesel_maps_to_ld() {
        assert_eq!(
            canonicalize_product("Clear Diesel", &default_map()).unwrap(),
            "LD"
        );
    }

    #[test]
    fn test_product_unleaded_maps_to_ur() {
        assert_eq!(
            canonicalize_product("UNLEADED REGULAR", &default_map()).unwrap(),
            "UR"
        );
    }

    #[test]
    fn test_product_spaced_dyed_variant() {
        assert_eq!(
            canonicalize_product("LD - DYED #2", &default_map()).unwrap(),
            "LD-Dyed"
        );
    }

    #[test]
    fn test_product_canonicalization_is_idempotent() {
        let map = default_map();
        for (_, canonical) in DEFAULT_PRODUCT_MAP {
            assert_eq!(
                canonicalize_product(canonical, &map).unwrap(),
                canonical,
                "canonical code {canonical:?} must survive a second pass"
            );
        }
    }

    #[test]
    fn test_product_unmapped_passthrough_uppercased() {
        assert_eq!(
            canonicalize_product("kerosene k-1", &default_map()).unwrap(),
            "KEROSENE K-1"
        );
    }

    #[test]
    fn test_product_first_match_wins_in_list_order() {
        // A string containing both RED DIESEL and CLEAR DIESEL resolves by
        // list position, not by match length or position in the string.
        assert_eq!(
            canonicalize_product("CLEAR DIESEL / RED DIESEL SPLIT", &default_map()).unwrap(),
            "LD-Dyed"
        );
    }

    #[test]
    fn test_product_blank_rejected() {
        assert_eq!(
            canonicalize_product("   ", &default_map()),
            Err(RowRejection::BlankProduct)
        );
    }

    // ── parse_gallons ─────────────────────────────────────────────────────

    #[test]
    fn test_gallons_plain_number() {
        assert_eq!(parse_gallons("250.5"), Ok(250.5));
    }

    #[test]
    fn test_gallons_thousands_separator() {
        assert_eq!(parse_gallons("1,250"), Ok(1250.0));
        assert_eq!(parse_gallons("12,345.67"), Ok(12345.67));
    }

    #[test]
    fn test_gallons_unparseable_rejected() {
        assert_eq!(parse_gallons("abc"), Err(RowRejection::UnparseableQuantity));
        assert_eq!(parse_gallons(""), Err(RowRejection::UnparseableQuantity));
    }

    #[test]
    fn test_gallons_zero_and_negative_rejected() {
        assert_eq!(parse_gallons("0"), Err(RowRejection::NonPositiveQuantity));
        assert_eq!(
            parse_gallons("-12.5"),
            Err(RowRejection::NonPositiveQuantity)
        );
    }

    #[test]
    fn test_gallons_nan_rejected() {
        // "NaN" parses as f64 NaN; the positivity gate must still reject it.
        assert_eq!(
            parse_gallons("NaN"),
            Err(RowRejection::NonPositiveQuantity)
        );
    }
}
