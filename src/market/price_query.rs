use crate::config::FieldNames;
use crate::dataset::DatasetSource;
use crate::market::lookup::{CaseInsensitiveLookup, value_text};
use crate::market::selector::select_best_record;
use crate::model::{
    DatasetError, DatasetQuery, NormalizedQuote, NotFoundReason, PriceOutcome, Record,
};
use crate::normalizer::{coerce_price, to_price_per_kg};

use std::sync::Arc;
use tracing::{info, warn};

/// Looks up a crop in the remote dataset and normalises its price to INR/kg.
///
/// Stateless across calls: every lookup is a single fetch with no retry.
pub struct PriceQuery {
    source: Arc<dyn DatasetSource>,
    fields: FieldNames,
    query: DatasetQuery,
}

impl PriceQuery {
    pub fn new(source: Arc<dyn DatasetSource>, fields: FieldNames, query: DatasetQuery) -> Self {
        Self {
            source,
            fields,
            query,
        }
    }

    pub async fn get_price(&self, crop_name: &str) -> Result<PriceOutcome, DatasetError> {
        let crop_name = crop_name.trim();
        info!("Querying market price for '{}'", crop_name);

        let records = match self.source.fetch(&self.query).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Price lookup for '{}' failed: {}", crop_name, e);
                return Err(e);
            }
        };

        let outcome = self.evaluate(&records, crop_name);
        match &outcome {
            PriceOutcome::Found(quote) => info!(
                "Found {} at {:.2} INR/kg (raw {} {})",
                quote.crop, quote.price_per_kg, quote.raw_price, quote.raw_unit
            ),
            PriceOutcome::NotFound(reason) => {
                info!("No price for '{}': {:?}", crop_name, reason)
            }
        }
        Ok(outcome)
    }

    /// Selection, field resolution and unit conversion over fetched rows.
    pub fn evaluate(&self, records: &[Record], crop_name: &str) -> PriceOutcome {
        if records.is_empty() {
            return PriceOutcome::NotFound(NotFoundReason::NoRecords);
        }

        let Some((record, crop)) =
            select_best_record(records, crop_name, &self.fields.crop_strategies)
        else {
            return PriceOutcome::NotFound(NotFoundReason::NoMatchingCrop);
        };

        match self.build_quote(record, crop) {
            Some(quote) => PriceOutcome::Found(quote),
            None => PriceOutcome::NotFound(NotFoundReason::UnusablePrice),
        }
    }

    /// `crop` is the crop text the row was selected on.
    fn build_quote(&self, record: &Record, crop: String) -> Option<NormalizedQuote> {
        let lookup = CaseInsensitiveLookup::new(record);
        let text_of = |names: &[String]| field_text(&lookup, names);

        let raw_text = text_of(self.fields.price.as_slice())?;
        let raw_unit = text_of(self.fields.unit.as_slice());
        let conversion = to_price_per_kg(&raw_text, raw_unit.as_deref());
        let price_per_kg = conversion.price_per_kg?;
        let raw_price = coerce_price(&raw_text)?;

        Some(NormalizedQuote {
            source_id: self.source.source_id().to_string(),
            crop,
            price_per_kg,
            raw_price,
            raw_unit: raw_unit.unwrap_or_else(|| "unknown".to_string()),
            unit_used: conversion.unit,
            unit_inferred: conversion.inferred,
            market: text_of(self.fields.market.as_slice()),
            date: text_of(self.fields.date.as_slice()),
        })
    }
}

fn field_text(lookup: &CaseInsensitiveLookup<'_>, names: &[String]) -> Option<String> {
    lookup.first_present(names).and_then(value_text)
}
