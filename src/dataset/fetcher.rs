use crate::config::DatasetConfig;
use crate::dataset::traits::DatasetSource;
use crate::model::{DatasetError, DatasetQuery, Record};
use crate::parser::{OpenDataParser, Parser};

use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Client for an open-data `resource` endpoint (data.gov.in style).
pub struct DataGovFetcher {
    client: Client,
    base_url: String,
    resource_id: String,
    api_key: String,
    parser: OpenDataParser,
}

impl DataGovFetcher {
    pub fn new(cfg: &DatasetConfig) -> Result<Self, DatasetError> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(DatasetError::ConfigurationMissing("DATA_GOV_API_KEY"))?;

        let client = Client::builder()
            .user_agent("AgroMarket/0.1")
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()
            .map_err(|e| DatasetError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            resource_id: cfg.resource_id.clone(),
            api_key,
            parser: OpenDataParser::new(),
        })
    }

    fn build_url(&self) -> String {
        format!("{}/resource/{}", self.base_url, self.resource_id)
    }

    fn build_params(&self, query: &DatasetQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("api-key".to_string(), self.api_key.clone()),
            ("format".to_string(), "json".to_string()),
            ("limit".to_string(), query.limit.to_string()),
        ];
        if let Some(field) = &query.sort_field {
            params.push((format!("sort[{}]", field), "desc".to_string()));
        }
        params
    }
}

fn map_transport_error(e: reqwest::Error) -> DatasetError {
    if e.is_timeout() {
        DatasetError::Timeout
    } else {
        DatasetError::Http(e.to_string())
    }
}

#[async_trait::async_trait]
impl DatasetSource for DataGovFetcher {
    fn source_id(&self) -> &str {
        &self.resource_id
    }

    async fn fetch(&self, query: &DatasetQuery) -> Result<Vec<Record>, DatasetError> {
        let url = self.build_url();
        info!("Fetching dataset {} (limit {})", self.resource_id, query.limit);

        let response = self
            .client
            .get(&url)
            .query(&self.build_params(query))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ Dataset responded [{}]", status);
            return Err(DatasetError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let records = self.parser.parse(&body)?;
        info!("✅ Dataset returned {} records", records.len());
        Ok(records)
    }
}
