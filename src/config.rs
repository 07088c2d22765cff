use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub base_url: String,
    pub resource_id: String,
    pub api_key: Option<String>,
    pub limit: u32,
    pub timeout_seconds: u64,
    /// Requested as `sort[<field>]=desc`; the remote API may ignore it.
    pub sort_field: Option<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.data.gov.in".into(),
            resource_id: "9ef84268-d588-465a-a308-a864a43d0070".into(),
            api_key: None,
            limit: 1000,
            timeout_seconds: 12,
            sort_field: Some("arrival_date".into()),
        }
    }
}

/// Candidate field names for every logical attribute of a dataset row.
/// Earlier names win.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Matching strategies for the crop column, tried in order.
    pub crop_strategies: Vec<Vec<String>>,
    pub price: Vec<String>,
    pub market: Vec<String>,
    pub date: Vec<String>,
    pub unit: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            crop_strategies: vec![
                names(&["commodity", "commodity_name", "crop", "crop_name"]),
                names(&["rabi_crop_wise", "kharif_crop_wise", "crops", "crop_wise"]),
                names(&["variety", "item", "product"]),
            ],
            price: names(&[
                "modal_price",
                "modalprice",
                "modal price",
                "modal",
                "_2025_26___msp",
                "_2024_25___msp",
                "msp",
                "price",
            ]),
            market: names(&["market", "market_name", "mandi", "apmc"]),
            date: names(&["arrival_date", "date", "price_date", "reported_date"]),
            unit: names(&["unit", "units", "price_unit", "unit_of_price"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-2.5-flash".into(),
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub dataset: DatasetConfig,
    pub fields: FieldNames,
    pub assistant: AssistantConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".into(),
            dataset: DatasetConfig::default(),
            fields: FieldNames::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

/// Reads the JSON config file. A missing file yields the defaults.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    info!("Loaded config from {}", path);
    Ok(config)
}

/// Applies environment overrides. `lookup` is usually `std::env::var(..).ok()`.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty("DATA_GOV_API_KEY") {
        config.dataset.api_key = Some(key);
    }
    if let Some(id) = non_empty("DATA_GOV_RESOURCE_ID") {
        config.dataset.resource_id = id;
    }
    if let Some(url) = non_empty("DATA_GOV_BASE_URL") {
        config.dataset.base_url = url;
    }
    if let Some(key) = non_empty("GOOGLE_API_KEY") {
        config.assistant.api_key = Some(key);
    }
    if let Some(model) = non_empty("GEMINI_MODEL") {
        config.assistant.model = model;
    }
    if let Some(addr) = non_empty("BIND_ADDR") {
        config.bind_addr = addr;
    }
    config
}
