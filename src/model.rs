// Core types: Record, PriceUnit, NormalizedQuote, lookup outcomes and errors
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// One row of the remote dataset. Keys and their casing come from the dataset.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    PerQuintal,
    PerKilogram,
    PerTonne,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedQuote {
    pub source_id: String,
    pub crop: String,
    pub price_per_kg: f64,
    pub raw_price: f64,
    /// Unit text as found in the record, `"unknown"` when the record has none.
    pub raw_unit: String,
    pub unit_used: PriceUnit,
    /// Set when the unit came from the magnitude heuristic.
    pub unit_inferred: bool,
    pub market: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    NoRecords,
    NoMatchingCrop,
    UnusablePrice,
}

impl NotFoundReason {
    pub fn message(&self, crop: &str) -> String {
        match self {
            NotFoundReason::NoRecords => {
                format!("The market dataset returned no rows while looking up '{}'.", crop)
            }
            NotFoundReason::NoMatchingCrop => format!("No market data found for '{}'.", crop),
            NotFoundReason::UnusablePrice => {
                format!("Market data for '{}' has no usable price.", crop)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PriceOutcome {
    Found(NormalizedQuote),
    NotFound(NotFoundReason),
}

#[derive(Debug, Clone)]
pub struct DatasetQuery {
    pub limit: u32,
    pub sort_field: Option<String>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing configuration: {0}")]
    ConfigurationMissing(&'static str),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("dataset responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("GOOGLE_API_KEY is not configured")]
    ConfigurationMissing,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("API responded [{0}]: {1}")]
    Status(u16, String),
    #[error("unexpected response format")]
    UnexpectedResponse,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
