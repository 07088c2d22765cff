// Extracts dataset rows from an open-data JSON response
use crate::model::{DatasetError, Record};
use serde_json::Value;

/// Top-level keys that may hold the row list, in the order they are checked.
pub const RECORD_KEYS: [&str; 3] = ["records", "result", "data"];

pub trait Parser {
    fn parse(&self, body: &str) -> Result<Vec<Record>, DatasetError>;
}

pub struct OpenDataParser;

impl OpenDataParser {
    pub fn new() -> Self {
        Self
    }

    /// Rows from an already decoded body. The first non-empty list under
    /// [`RECORD_KEYS`] is used; non-object entries are skipped.
    pub fn records_from_value(&self, body: Value) -> Result<Vec<Record>, DatasetError> {
        let Value::Object(mut top) = body else {
            return Err(DatasetError::MalformedBody(
                "expected a JSON object at the top level".into(),
            ));
        };

        for key in RECORD_KEYS {
            let Some(Value::Array(rows)) = top.remove(key) else {
                continue;
            };
            if rows.is_empty() {
                continue;
            }
            let records: Vec<Record> = rows
                .into_iter()
                .filter_map(|row| match row {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect();
            return Ok(records);
        }

        Ok(Vec::new())
    }
}

impl Parser for OpenDataParser {
    fn parse(&self, body: &str) -> Result<Vec<Record>, DatasetError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| DatasetError::MalformedBody(e.to_string()))?;
        self.records_from_value(value)
    }
}
