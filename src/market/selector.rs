// Picks the dataset row that best matches a crop name
use crate::market::lookup::{resolve, value_text};
use crate::model::Record;

/// Returns the first record whose crop column contains `crop_name`
/// (case-insensitive), together with the crop text it matched on.
///
/// Each strategy is a list of candidate column names. Strategies are tried in
/// order and the first one that matches any record wins; within it the
/// dataset's own row order decides.
pub fn select_best_record<'a, S: AsRef<str>>(
    records: &'a [Record],
    crop_name: &str,
    strategies: &[Vec<S>],
) -> Option<(&'a Record, String)> {
    let needle = crop_name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    strategies.iter().find_map(|columns| {
        records.iter().find_map(|record| {
            resolve(record, columns, None)
                .and_then(value_text)
                .filter(|crop| crop.to_lowercase().contains(&needle))
                .map(|crop| (record, crop))
        })
    })
}
