// Utility functions
use chrono::{SecondsFormat, Utc};

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a per-kg price the way clients display it, e.g. `₹24.25/kg`.
pub fn format_inr_per_kg(price: f64) -> String {
    format!("₹{:.2}/kg", price)
}

/// Current UTC time as ISO-8601 with a trailing `Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
