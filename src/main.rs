mod assistant;
mod config;
mod dataset;
mod market;
mod model;
mod normalizer;
mod parser;
mod reference;
mod server;
mod utils;

use assistant::{ChatRelay, GeminiAssistant};
use config::{AppConfig, apply_env_overrides, load_config};
use dataset::{DataGovFetcher, DatasetSource};
use market::PriceQuery;
use model::DatasetQuery;
use server::{AppState, run_server};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    // Load configuration from file, then let the environment override it
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => apply_env_overrides(cfg, |key| std::env::var(key).ok()),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let price_query = build_price_query(&config);

    let assistant: Arc<dyn ChatRelay> = match GeminiAssistant::new(&config.assistant) {
        Ok(a) => {
            if a.api_key.is_none() {
                warn!("GOOGLE_API_KEY not set, advice requests will be answered with a notice");
            }
            Arc::new(a)
        }
        Err(e) => {
            error!("Failed to initialize assistant client: {}", e);
            return;
        }
    };

    let state = Arc::new(AppState {
        price_query,
        assistant,
    });

    info!("Starting server on {}", config.bind_addr);
    if let Err(e) = run_server(&config.bind_addr, state).await {
        error!("Server error: {}", e);
    }
}

/// Builds the live price lookup, or `None` when the dataset is not configured.
fn build_price_query(config: &AppConfig) -> Option<Arc<PriceQuery>> {
    let fetcher = match DataGovFetcher::new(&config.dataset) {
        Ok(f) => f,
        Err(e) => {
            warn!("Market price lookup disabled: {}", e);
            return None;
        }
    };
    info!("Market prices from dataset {}", fetcher.source_id());

    let query = DatasetQuery {
        limit: config.dataset.limit,
        sort_field: config.dataset.sort_field.clone(),
    };
    Some(Arc::new(PriceQuery::new(
        Arc::new(fetcher),
        config.fields.clone(),
        query,
    )))
}
