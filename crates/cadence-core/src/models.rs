use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One normalized delivery event extracted from a source unit.
///
/// Records are immutable once created. Serde field names match the raw-record
/// report schema, so rows can be serialized straight into the CSV output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Calendar date of the delivery (no time component).
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Canonical customer name: uppercase, trimmed, never empty.
    #[serde(rename = "Customer")]
    pub customer: String,
    /// Canonical product code, or the raw uppercased text when unmapped.
    #[serde(rename = "Product")]
    pub product: String,
    /// Delivered volume; always strictly positive.
    #[serde(rename = "Gallons")]
    pub gallons: f64,
    /// Name of the originating file/sheet. Audit only, never analyzed.
    #[serde(rename = "Source_File")]
    pub provenance: String,
}

/// Delivery-cadence classification for one (customer, product) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    /// Single delivery, no cadence to speak of.
    Irregular,
    /// Mean interval of 5–9 days inclusive.
    Weekly,
    /// Mean interval of 12–16 days inclusive.
    BiWeekly,
    /// Mean interval of 25–35 days inclusive.
    Monthly,
    /// Anything else, carrying the rounded mean interval in days.
    Custom(i64),
}

impl Frequency {
    /// Classify a mean delivery interval (in days) into a frequency bucket.
    ///
    /// Boundaries are inclusive and the ranges deliberately do not cover
    /// every value: 10- and 11-day averages fall through to `Custom`, as do
    /// averages between 17 and 24. Callers handle the single-delivery case
    /// themselves (`Irregular` is never produced here).
    pub fn classify(avg_interval_days: f64) -> Self {
        let avg = avg_interval_days;
        if (5.0..=9.0).contains(&avg) {
            Frequency::Weekly
        } else if (12.0..=16.0).contains(&avg) {
            Frequency::BiWeekly
        } else if (25.0..=35.0).contains(&avg) {
            Frequency::Monthly
        } else {
            Frequency::Custom(round_half_up(avg))
        }
    }

    /// Human-readable label used in the summary report.
    pub fn label(&self) -> String {
        match self {
            Frequency::Irregular => "Irregular/One-off".to_string(),
            Frequency::Weekly => "Weekly".to_string(),
            Frequency::BiWeekly => "Bi-Weekly".to_string(),
            Frequency::Monthly => "Monthly".to_string(),
            Frequency::Custom(days) => format!("Custom ({} days)", days),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Round to the nearest whole day, halves away from zero (half-up for the
/// positive intervals that occur here).
pub fn round_half_up(value: f64) -> i64 {
    value.round() as i64
}

/// Cadence statistics and forecast for one (customer, product) group.
///
/// Derived, read-only output of a single analysis run.
#[derive(Debug, Clone)]
pub struct CadenceSummary {
    pub customer: String,
    pub product: String,
    pub frequency: Frequency,
    /// Mean gap between consecutive distinct delivery dates, in days.
    /// Full precision; rounded to one decimal only for reporting.
    pub avg_interval_days: f64,
    /// Dominant delivery weekday, present only with 3+ deliveries.
    pub pattern_day: Option<Weekday>,
    pub last_delivery: NaiveDate,
    /// Projected next delivery; absent for single-delivery groups.
    pub forecasted_date: Option<NaiveDate>,
    /// Count of distinct delivery dates (same-day duplicates collapse).
    pub total_deliveries: usize,
    /// Sum of gallons over all contributing records, duplicates included.
    pub total_gallons: f64,
}

impl CadenceSummary {
    /// The mean interval rounded to one decimal, as reported.
    pub fn avg_interval_reported(&self) -> f64 {
        (self.avg_interval_days * 10.0).round() / 10.0
    }

    /// Pattern-day column value: full weekday name or `N/A`.
    pub fn pattern_day_label(&self) -> String {
        match self.pattern_day {
            Some(day) => weekday_name(day).to_string(),
            None => "N/A".to_string(),
        }
    }

    /// Forecast column value: `YYYY-MM-DD` or `N/A`.
    pub fn forecasted_date_label(&self) -> String {
        match self.forecasted_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Full English weekday name for a delivery date.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
