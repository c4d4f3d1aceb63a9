use serde::Deserialize;
use super::{lenient_string, lenient_u32};

/// Token metadata as returned by the assets endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Asset {
    #[serde(alias = "contractAddress", default, deserialize_with = "lenient_string")]
    pub contract_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(alias = "displayName", default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub decimals: Option<u32>,
    #[serde(alias = "dexUsdPrice", default, deserialize_with = "lenient_string")]
    pub dex_usd_price: Option<String>,
}

impl Asset {
    pub fn new(address: &str, symbol: &str, display_name: &str, decimals: u32) -> Self {
        Self {
            contract_address: Some(address.to_string()),
            symbol: Some(symbol.to_string()),
            display_name: Some(display_name.to_string()),
            decimals: Some(decimals),
            dex_usd_price: None,
        }
    }

    pub fn with_usd_price(mut self, price: &str) -> Self {
        self.dex_usd_price = Some(price.to_string());
        self
    }

    /// Non-empty contract address, if any.
    pub fn address(&self) -> Option<&str> {
        self.contract_address.as_deref().filter(|a| !a.is_empty())
    }
}
