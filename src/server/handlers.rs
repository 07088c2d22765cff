//! Route handlers. Every path answers with a JSON body, including failures.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::app::AppState;
use crate::assistant::ChatMessage;
use crate::assistant::prompts::Language;
use crate::model::{DatasetError, NormalizedQuote, PriceOutcome, PriceUnit};
use crate::reference::{CLIMATE_ZONES, SOIL_TYPES, sample_price};
use crate::utils::{format_inr_per_kg, utc_timestamp};

const TRY_AGAIN: &str = "Could not reach the market price service. Please try again shortly.";

#[derive(Debug, Deserialize)]
pub(crate) struct CropParams {
    crop: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductParams {
    product: Option<String>,
    crop: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdviceRequest {
    soil_type: Option<String>,
    climate: Option<String>,
    language: Option<String>,
    messages: Option<Vec<ChatMessage>>,
    query: Option<String>,
}

enum LookupFailure {
    NotConfigured(&'static str),
    Transport(DatasetError),
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({"status": "error", "error": message.into()})),
    )
        .into_response()
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn lookup_price(state: &AppState, crop: &str) -> Result<PriceOutcome, LookupFailure> {
    let Some(price_query) = &state.price_query else {
        return Err(LookupFailure::NotConfigured(
            "Market prices are unavailable: DATA_GOV_API_KEY is not configured.",
        ));
    };
    price_query
        .get_price(crop)
        .await
        .map_err(LookupFailure::Transport)
}

fn failure_response(crop: &str, failure: LookupFailure) -> Response {
    match failure {
        LookupFailure::NotConfigured(message) => {
            warn!("Price lookup for '{}' skipped: not configured", crop);
            error_body(StatusCode::SERVICE_UNAVAILABLE, message)
        }
        LookupFailure::Transport(e) => {
            error!("Price lookup for '{}' failed: {}", crop, e);
            error_body(StatusCode::BAD_GATEWAY, TRY_AGAIN)
        }
    }
}

fn unit_label(unit: PriceUnit) -> &'static str {
    match unit {
        PriceUnit::PerQuintal => "per quintal",
        PriceUnit::PerKilogram => "per kg",
        PriceUnit::PerTonne => "per tonne",
        PriceUnit::Unknown => "unit unknown",
    }
}

fn describe_quote(quote: &NormalizedQuote) -> String {
    let mut lines = Vec::new();
    if let Some(market) = &quote.market {
        lines.push(format!("Market: {}", market));
    }
    if let Some(date) = &quote.date {
        lines.push(format!("Date: {}", date));
    }
    let inferred = if quote.unit_inferred { " (inferred)" } else { "" };
    lines.push(format!(
        "Reported: ₹{} {}{}",
        quote.raw_price,
        unit_label(quote.unit_used),
        inferred
    ));
    lines.join("\n")
}

/// `GET /market_price?crop=`
pub(crate) async fn market_price(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CropParams>,
) -> Response {
    let Some(crop) = required(params.crop) else {
        return error_body(
            StatusCode::BAD_REQUEST,
            "Please provide crop parameter, e.g. ?crop=wheat",
        );
    };

    match lookup_price(&state, &crop).await {
        Ok(PriceOutcome::Found(quote)) => Json(json!({
            "status": "found",
            "crop": crop,
            "price_in_inr_per_kg": format_inr_per_kg(quote.price_per_kg),
            "quote": quote,
        }))
        .into_response(),
        Ok(PriceOutcome::NotFound(reason)) => Json(json!({
            "status": "not_found",
            "crop": crop,
            "reason": reason,
            "message": reason.message(&crop),
        }))
        .into_response(),
        Err(failure) => failure_response(&crop, failure),
    }
}

/// `GET /market_online?product=` in the search-results shape the web client renders.
pub(crate) async fn market_online(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductParams>,
) -> Response {
    let Some(product) = required(params.product).or_else(|| required(params.crop)) else {
        return error_body(
            StatusCode::BAD_REQUEST,
            "Please provide product parameter, e.g. ?product=wheat",
        );
    };

    match lookup_price(&state, &product).await {
        Ok(PriceOutcome::Found(quote)) => Json(json!({
            "results": [{
                "title": quote.crop,
                "description": describe_quote(&quote),
                "price_in_inr_per_kg": format_inr_per_kg(quote.price_per_kg),
            }]
        }))
        .into_response(),
        Ok(PriceOutcome::NotFound(reason)) => Json(json!({
            "results": [],
            "message": reason.message(&product),
        }))
        .into_response(),
        Err(failure) => failure_response(&product, failure),
    }
}

/// `GET /market?crop=` against the static sample table.
pub(crate) async fn sample_market(Query(params): Query<CropParams>) -> Response {
    let Some(crop) = required(params.crop).map(|c| c.to_lowercase()) else {
        return error_body(
            StatusCode::BAD_REQUEST,
            "Please provide crop parameter, e.g. ?crop=rice",
        );
    };

    match sample_price(&crop) {
        Some(entry) => Json(json!({
            "crop": crop,
            "price_per_kg": entry.price_per_kg,
            "link": entry.link,
        }))
        .into_response(),
        None => Json(json!({
            "crop": crop,
            "message": format!("No static data for '{}'. Try searching a mandi portal.", crop),
            "suggested_link": format!(
                "https://www.google.com/search?q={}+market+price",
                crop.replace(' ', "+")
            ),
        }))
        .into_response(),
    }
}

fn table_json(table: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = table
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect();
    Value::Object(map)
}

/// `GET /reference`
pub(crate) async fn reference_tables() -> Json<Value> {
    Json(json!({
        "soil_types": table_json(SOIL_TYPES),
        "climate_zones": table_json(CLIMATE_ZONES),
    }))
}

fn opening_message(req: &AdviceRequest) -> String {
    format!(
        "Soil Type: {}\nClimate: {}\nQuery: {}",
        req.soil_type.as_deref().unwrap_or(""),
        req.climate.as_deref().unwrap_or(""),
        req.query.as_deref().unwrap_or("")
    )
}

/// `POST /get_advice`
pub(crate) async fn get_advice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Rejected advice request: {}", rejection.body_text());
            return error_body(rejection.status(), rejection.body_text());
        }
    };
    let language = Language::from_selector(req.language.as_deref());
    let messages = match &req.messages {
        Some(messages) if !messages.is_empty() => messages.clone(),
        _ => vec![ChatMessage::user(opening_message(&req))],
    };
    info!(
        "Advice requested ({} messages, {:?})",
        messages.len(),
        language
    );

    let answer = state.assistant.reply(&messages, language).await;
    Json(json!({
        "response": answer,
        "timestamp": utc_timestamp(),
    }))
    .into_response()
}
