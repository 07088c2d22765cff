//! HTTP surface: market price lookup, static reference data and the advice relay.

mod app;
mod handlers;

pub use app::AppState;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use app::router;

/// Serves on an existing listener. Tests bind `127.0.0.1:0` and pass it in.
pub async fn run_server_on_listener(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}", addr);
    axum::serve(listener, router(state)).await
}

pub async fn run_server(addr: &str, state: Arc<AppState>) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    run_server_on_listener(listener, state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::prompts::Language;
    use crate::assistant::{ChatMessage, ChatRelay};
    use crate::market::price_query::tests::{StubSource, price_query};
    use serde_json::{Value, json};

    /// Echoes the last message back with the language it was asked in.
    struct EchoRelay;

    #[async_trait::async_trait]
    impl ChatRelay for EchoRelay {
        async fn reply(&self, messages: &[ChatMessage], language: Language) -> String {
            let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
            format!("{:?}|{}|{}", language, messages.len(), last)
        }
    }

    async fn spawn_app(source: Option<StubSource>) -> String {
        let state = Arc::new(AppState {
            price_query: source.map(|s| Arc::new(price_query(s))),
            assistant: Arc::new(EchoRelay),
        });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(run_server_on_listener(listener, state));
        format!("http://{}", addr)
    }

    async fn get_json(url: &str) -> (u16, Value) {
        let resp = reqwest::get(url).await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    fn msp_rows() -> StubSource {
        StubSource::rows(json!([
            {"rabi_crop_wise": "Barley", "_2025_26___msp": "1980"},
            {"rabi_crop_wise": "Wheat", "_2025_26___msp": "2425"}
        ]))
    }

    #[tokio::test]
    async fn market_price_found() {
        let base = spawn_app(Some(msp_rows())).await;
        let (status, body) = get_json(&format!("{}/market_price?crop=wheat", base)).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "found");
        assert_eq!(body["price_in_inr_per_kg"], "₹24.25/kg");
        assert_eq!(body["quote"]["price_per_kg"], 24.25);
        assert_eq!(body["quote"]["unit_used"], "per_quintal");
        assert_eq!(body["quote"]["market"], Value::Null);
    }

    #[tokio::test]
    async fn market_price_not_found_is_success() {
        let base = spawn_app(Some(msp_rows())).await;
        let (status, body) = get_json(&format!("{}/market_price?crop=saffron", base)).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "not_found");
        assert_eq!(body["reason"], "no_matching_crop");
    }

    #[tokio::test]
    async fn market_price_upstream_failure_is_reported() {
        let base = spawn_app(Some(StubSource::failing(500))).await;
        let (status, body) = get_json(&format!("{}/market_price?crop=wheat", base)).await;
        assert_eq!(status, 502);
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("try again"));
    }

    #[tokio::test]
    async fn market_price_requires_crop() {
        let base = spawn_app(Some(msp_rows())).await;
        let (status, body) = get_json(&format!("{}/market_price", base)).await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("crop"));
        let (status, _) = get_json(&format!("{}/market_price?crop=%20", base)).await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn market_price_without_key_explains_itself() {
        let base = spawn_app(None).await;
        let (status, body) = get_json(&format!("{}/market_price?crop=wheat", base)).await;
        assert_eq!(status, 503);
        assert!(body["error"].as_str().unwrap().contains("DATA_GOV_API_KEY"));
    }

    #[tokio::test]
    async fn market_online_uses_results_shape() {
        let base = spawn_app(Some(msp_rows())).await;
        let (status, body) = get_json(&format!("{}/market_online?product=Wheat", base)).await;
        assert_eq!(status, 200);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["title"], "Wheat");
        assert_eq!(results[0]["price_in_inr_per_kg"], "₹24.25/kg");
        assert!(results[0]["description"].as_str().unwrap().contains("(inferred)"));

        let (status, body) = get_json(&format!("{}/market_online?product=saffron", base)).await;
        assert_eq!(status, 200);
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sample_market_table() {
        let base = spawn_app(None).await;
        let (status, body) = get_json(&format!("{}/market?crop=Rice", base)).await;
        assert_eq!(status, 200);
        assert_eq!(body["price_per_kg"], 25.0);

        let (status, body) = get_json(&format!("{}/market?crop=jackfruit", base)).await;
        assert_eq!(status, 200);
        assert!(body["suggested_link"].as_str().unwrap().contains("jackfruit+market+price"));

        let (status, _) = get_json(&format!("{}/market", base)).await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn reference_lists_soils_and_climates() {
        let base = spawn_app(None).await;
        let (_, body) = get_json(&format!("{}/reference", base)).await;
        assert_eq!(body["soil_types"].as_object().unwrap().len(), 4);
        assert_eq!(body["climate_zones"]["arid"], "Hot and dry with minimal rainfall");
    }

    #[tokio::test]
    async fn advice_builds_opening_message_when_history_is_absent() {
        let base = spawn_app(None).await;
        let resp = reqwest::Client::new()
            .post(format!("{}/get_advice", base))
            .json(&json!({"soil_type": "loam", "climate": "arid", "query": "What to plant?", "language": "ta"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        let answer = body["response"].as_str().unwrap();
        assert_eq!(answer, "Tamil|1|Soil Type: loam\nClimate: arid\nQuery: What to plant?");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn advice_relays_existing_history() {
        let base = spawn_app(None).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{}/get_advice", base))
            .json(&json!({"messages": [
                {"role": "user", "content": "Best fertiliser for paddy?"},
                {"role": "assistant", "content": "Urea in splits."},
                {"role": "user", "content": "How many splits?"}
            ]}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["response"], "English|3|How many splits?");
    }

    #[tokio::test]
    async fn advice_opening_message_leaves_missing_fields_blank() {
        let base = spawn_app(None).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{}/get_advice", base))
            .json(&json!({"query": "Rain is late"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            body["response"],
            "English|1|Soil Type: \nClimate: \nQuery: Rain is late"
        );
    }

    #[tokio::test]
    async fn advice_accepts_foreign_roles_in_history() {
        let base = spawn_app(None).await;
        let resp = reqwest::Client::new()
            .post(format!("{}/get_advice", base))
            .json(&json!({"messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "model", "content": "Sure."},
                {"role": "user", "content": "Sow now?"}
            ]}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["response"], "English|3|Sow now?");
    }

    #[tokio::test]
    async fn advice_rejects_malformed_body_with_json_error() {
        let base = spawn_app(None).await;
        let resp = reqwest::Client::new()
            .post(format!("{}/get_advice", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert!(!body["error"].as_str().unwrap().is_empty());

        let resp = reqwest::Client::new()
            .post(format!("{}/get_advice", base))
            .body("soil_type=loam")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 415);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "error");
    }
}
