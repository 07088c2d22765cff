// Case-insensitive field access over dataset rows
use crate::model::Record;
use serde_json::Value;
use std::collections::HashMap;

/// Lower-cased view of a record's keys.
///
/// When two keys differ only in casing the one that comes first in the
/// record's iteration order is kept.
pub struct CaseInsensitiveLookup<'a> {
    index: HashMap<String, &'a Value>,
}

impl<'a> CaseInsensitiveLookup<'a> {
    pub fn new(record: &'a Record) -> Self {
        let mut index = HashMap::with_capacity(record.len());
        for (key, value) in record {
            index.entry(key.trim().to_lowercase()).or_insert(value);
        }
        Self { index }
    }

    /// Value of the first candidate that is present and not an empty marker.
    pub fn first_present<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&'a Value> {
        candidates.iter().find_map(|name| {
            self.index
                .get(&name.as_ref().trim().to_lowercase())
                .copied()
                .filter(|v| !is_empty_marker(v))
        })
    }
}

/// `null`, blank strings and "NA" / "N/A" count as absent.
pub fn is_empty_marker(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim();
            s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("n/a")
        }
        _ => false,
    }
}

/// Resolves one logical field of `record`, falling back to `default`.
pub fn resolve<'a, S: AsRef<str>>(
    record: &'a Record,
    candidates: &[S],
    default: Option<&'a Value>,
) -> Option<&'a Value> {
    CaseInsensitiveLookup::new(record)
        .first_present(candidates)
        .or(default)
}

/// Text form of a scalar value. Arrays and objects have none.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
