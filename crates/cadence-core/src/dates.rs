//! Date resolution for one input unit.
//!
//! A unit carries its delivery date either somewhere in its first rows
//! (report-style exports put it above the table) or encoded in the file/sheet
//! name (e.g. `NOV25.xlsx - NOV 29.csv`). Resolution tries the grid content
//! first and falls back to the name; when both fail the caller skips the
//! whole unit.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

/// How many leading rows of the grid are scanned for an in-content date.
const CONTENT_SCAN_ROWS: usize = 15;

/// Month abbreviations matched against name tokens by prefix containment:
/// a token matches when it starts with the abbreviation, so "SEPT" matches
/// "SEP" and "JANUARY" matches "JAN".
const MONTH_ABBREVIATIONS: [(&str, u32); 12] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Resolve the single delivery date for a unit, or `None` when unresolvable.
///
/// Priority order:
/// 1. ISO `YYYY-MM-DD` token anywhere in the first 15 rows.
/// 2. Slash-delimited `M/D/YY` or `M/D/YYYY` token in the same rows,
///    month-first; unparseable candidates are skipped, not fatal.
/// 3. Month-word + day token in the unit name, combined with
///    `operating_year`.
pub fn resolve_unit_date(
    grid: &[Vec<String>],
    unit_name: &str,
    operating_year: i32,
) -> Option<NaiveDate> {
    if let Some(date) = date_from_content(grid) {
        debug!("Resolved date {} from content of {}", date, unit_name);
        return Some(date);
    }
    if let Some(date) = date_from_name(unit_name, operating_year) {
        debug!("Resolved date {} from name of {}", date, unit_name);
        return Some(date);
    }
    None
}

// ── Content scanning ──────────────────────────────────────────────────────────

/// Search the first [`CONTENT_SCAN_ROWS`] rows for a date token.
fn date_from_content(grid: &[Vec<String>]) -> Option<NaiveDate> {
    let iso = Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("regex is valid");
    let slash = Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{2,4})\b").expect("regex is valid");

    let rows: Vec<String> = grid
        .iter()
        .take(CONTENT_SCAN_ROWS)
        .map(|row| row.join(" "))
        .collect();

    // ISO tokens take priority over slash tokens in any row.
    for text in &rows {
        for caps in iso.captures_iter(text) {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    for text in &rows {
        for caps in slash.captures_iter(text) {
            // Locale convention is month-first.
            let month: u32 = match caps[1].parse() {
                Ok(m) => m,
                Err(_) => continue,
            };
            let day: u32 = match caps[2].parse() {
                Ok(d) => d,
                Err(_) => continue,
            };
            let raw_year = &caps[3];
            let year: i32 = match raw_year.parse() {
                Ok(y) => y,
                Err(_) => continue,
            };
            let year = if raw_year.len() == 2 { 2000 + year } else { year };
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    None
}

// ── Name fallback ─────────────────────────────────────────────────────────────

/// Infer a date from the unit name, e.g. `NOV25.xlsx - NOV 29.csv` → Nov 29.
///
/// The exporters place the day-specific part after the last hyphen, so only
/// that segment is searched; the operating year supplies the year component.
fn date_from_name(unit_name: &str, operating_year: i32) -> Option<NaiveDate> {
    let mut base = unit_name.to_uppercase();
    for ext in [".CSV", ".XLSX"] {
        base = base.replace(ext, "");
    }

    let segment = base.rsplit('-').next().unwrap_or(&base);
    let cleaned: String = segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    let token = Regex::new(r"([A-Z]+)\s*(\d{1,2})\b").expect("regex is valid");
    for caps in token.captures_iter(&cleaned) {
        let word = &caps[1];
        let day: u32 = match caps[2].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        for (abbr, month) in MONTH_ABBREVIATIONS {
            if word.starts_with(abbr) {
                if let Some(date) = NaiveDate::from_ymd_opt(operating_year, month, day) {
                    return Some(date);
                }
            }
        }
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // ── Content: ISO ──────────────────────────────────────────────────────

    #[test]
    fn test_iso_date_in_content() {
        let grid = grid(&[
            &["Daily Delivery Log", ""],
            &["Report date:", "2025-11-29"],
        ]);
        assert_eq!(
            resolve_unit_date(&grid, "whatever.csv", 2025),
            Some(ymd(2025, 11, 29))
        );
    }

    #[test]
    fn test_iso_beats_slash_even_in_later_row() {
        let grid = grid(&[&["Printed 3/5/25"], &["As of 2025-11-29"]]);
        assert_eq!(
            resolve_unit_date(&grid, "x.csv", 2025),
            Some(ymd(2025, 11, 29))
        );
    }

    #[test]
    fn test_content_scan_limited_to_first_15_rows() {
        let mut rows: Vec<Vec<String>> = (0..20).map(|i| vec![format!("row {}", i)]).collect();
        rows[17] = vec!["2025-11-29".to_string()];
        assert_eq!(resolve_unit_date(&rows, "nodate", 2025), None);
    }

    // ── Content: slash ────────────────────────────────────────────────────

    #[test]
    fn test_slash_date_month_first() {
        let grid = grid(&[&["Deliveries for 11/29/25"]]);
        assert_eq!(
            resolve_unit_date(&grid, "x.csv", 2025),
            Some(ymd(2025, 11, 29))
        );
    }

    #[test]
    fn test_slash_date_four_digit_year() {
        let grid = grid(&[&["Deliveries for 1/8/2025"]]);
        assert_eq!(
            resolve_unit_date(&grid, "x.csv", 2025),
            Some(ymd(2025, 1, 8))
        );
    }

    #[test]
    fn test_invalid_slash_candidate_does_not_stop_scan() {
        // 13/45/25 is not a real date; the scan must continue to the next row.
        let grid = grid(&[&["ref 13/45/25"], &["printed 11/29/25"]]);
        assert_eq!(
            resolve_unit_date(&grid, "x.csv", 2025),
            Some(ymd(2025, 11, 29))
        );
    }

    // ── Name fallback ─────────────────────────────────────────────────────

    #[test]
    fn test_name_fallback_month_day() {
        let grid = grid(&[&["no date here"]]);
        assert_eq!(
            resolve_unit_date(&grid, "NOV25.xlsx - NOV 29.csv", 2025),
            Some(ymd(2025, 11, 29))
        );
    }

    #[test]
    fn test_name_fallback_prefix_containment_sept() {
        // "SEPT" must match the "SEP" table entry.
        assert_eq!(date_from_name("SEPT 4.csv", 2025), Some(ymd(2025, 9, 4)));
    }

    #[test]
    fn test_name_fallback_lowercase_name() {
        assert_eq!(date_from_name("oct 12.csv", 2025), Some(ymd(2025, 10, 12)));
    }

    #[test]
    fn test_name_fallback_no_separator_between_month_and_day() {
        assert_eq!(date_from_name("NOV25.csv", 2025), Some(ymd(2025, 11, 25)));
    }

    #[test]
    fn test_name_fallback_uses_operating_year() {
        assert_eq!(date_from_name("JAN 3.csv", 2024), Some(ymd(2024, 1, 3)));
    }

    #[test]
    fn test_name_fallback_invalid_day_rejected() {
        // FEB 31 does not exist; resolution must fail rather than invent a date.
        assert_eq!(date_from_name("FEB 31.csv", 2025), None);
    }

    #[test]
    fn test_name_fallback_non_month_word() {
        assert_eq!(date_from_name("sheet 7.csv", 2025), None);
    }

    // ── Unresolved ────────────────────────────────────────────────────────

    #[test]
    fn test_unresolvable_returns_none() {
        let grid = grid(&[&["Customer Name", "Product", "Gallons"]]);
        assert_eq!(resolve_unit_date(&grid, "deliveries.csv", 2025), None);
    }

    #[test]
    fn test_empty_grid_falls_back_to_name() {
        assert_eq!(
            resolve_unit_date(&[], "DEC 1.csv", 2025),
            Some(ymd(2025, 12, 1))
        );
    }
}
