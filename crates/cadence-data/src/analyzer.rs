//! Cadence analysis over the merged record set.
//!
//! Groups records by (customer, product), measures the gaps between distinct
//! delivery dates, classifies the delivery frequency, detects a dominant
//! weekday, and forecasts the next delivery. Requires the complete record
//! set: frequency classification needs every date in a group, so this stage
//! runs strictly after all ingestion has finished.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use cadence_core::models::{CadenceSummary, DeliveryRecord, Frequency};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Produce one [`CadenceSummary`] per distinct (customer, product) pair.
///
/// Summaries are emitted in (customer, product) key order, so output is
/// deterministic for a given record set regardless of input order.
pub fn analyze_cadence(records: &[DeliveryRecord]) -> Vec<CadenceSummary> {
    let mut groups: BTreeMap<(String, String), Vec<&DeliveryRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.customer.clone(), record.product.clone()))
            .or_default()
            .push(record);
    }

    debug!(
        "Analyzing {} records across {} customer/product groups",
        records.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|((customer, product), group)| summarize_group(customer, product, &group))
        .collect()
}

// ── Per-group analysis ────────────────────────────────────────────────────────

/// Build the cadence summary for one (customer, product) group.
fn summarize_group(
    customer: String,
    product: String,
    records: &[&DeliveryRecord],
) -> CadenceSummary {
    // Distinct dates only: same-day duplicate entries collapse into one
    // delivery event for interval purposes, but every record's gallons count.
    let dates: Vec<NaiveDate> = records
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let total_gallons: f64 = records.iter().map(|r| r.gallons).sum();
    let last_delivery = *dates.last().expect("group is never empty");

    if dates.len() == 1 {
        return CadenceSummary {
            customer,
            product,
            frequency: Frequency::Irregular,
            avg_interval_days: 0.0,
            pattern_day: None,
            last_delivery,
            forecasted_date: None,
            total_deliveries: 1,
            total_gallons,
        };
    }

    let avg_interval_days = mean_interval_days(&dates);
    let frequency = Frequency::classify(avg_interval_days);
    let forecasted_date = last_delivery
        .checked_add_signed(Duration::days(avg_interval_days.round() as i64));

    let pattern_day = if dates.len() >= 3 {
        Some(dominant_weekday(&dates))
    } else {
        None
    };

    CadenceSummary {
        customer,
        product,
        frequency,
        avg_interval_days,
        pattern_day,
        last_delivery,
        forecasted_date,
        total_deliveries: dates.len(),
        total_gallons,
    }
}

/// Arithmetic mean of the gaps between consecutive sorted dates, in days.
fn mean_interval_days(dates: &[NaiveDate]) -> f64 {
    let gaps: Vec<i64> = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect();
    gaps.iter().sum::<i64>() as f64 / gaps.len() as f64
}

/// The weekday with the most deliveries among `dates` (sorted ascending).
///
/// Ties go to the weekday that occurs first among the sorted dates, so the
/// result is deterministic and reproducible.
fn dominant_weekday(dates: &[NaiveDate]) -> Weekday {
    let mut occurrences: HashMap<Weekday, (usize, usize)> = HashMap::new();
    for (index, date) in dates.iter().enumerate() {
        let entry = occurrences.entry(date.weekday()).or_insert((0, index));
        entry.0 += 1;
    }

    occurrences
        .into_iter()
        .max_by_key(|&(_, (count, first_index))| (count, std::cmp::Reverse(first_index)))
        .map(|(weekday, _)| weekday)
        .expect("dominant_weekday requires at least one date")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
