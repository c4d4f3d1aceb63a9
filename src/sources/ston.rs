use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::config::UpstreamConfig;
use crate::error::SourceError;
use crate::models::{Asset, Pool};
use super::DexSource;

const ASSET_LIST_KEYS: &[&str] = &["asset_list", "assets", "data"];
const POOL_LIST_KEYS: &[&str] = &["pool_list", "pools", "data"];

/// STON.fi public REST API.
pub struct StonApiClient {
    client: Client,
    base_url: String,
}

impl StonApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str) -> Result<Value, SourceError> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self.client.get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DexSource for StonApiClient {
    fn name(&self) -> &'static str {
        "STON.fi"
    }

    async fn fetch_assets(&self) -> Result<Vec<Asset>, SourceError> {
        let body = self.get_json("/v1/assets").await?;
        parse_list(body, ASSET_LIST_KEYS)
    }

    async fn fetch_pools(&self) -> Result<Vec<Pool>, SourceError> {
        let body = self.get_json("/v1/pools").await?;
        parse_list(body, POOL_LIST_KEYS)
    }
}

/// Normalises a bare array or an object wrapping one under any of `keys`.
/// Entries that do not deserialize are skipped.
pub fn parse_list<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<Vec<T>, SourceError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| SourceError::Parse(format!("expected a list under one of {:?}", keys)))?,
        other => {
            return Err(SourceError::Parse(format!("unexpected response shape: {}", type_name(&other))));
        }
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if parsed.len() < total {
        tracing::debug!("Skipped {} malformed records", total - parsed.len());
    }

    Ok(parsed)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
