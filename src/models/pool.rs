use serde::Deserialize;
use super::lenient_string;

/// Liquidity pool record as returned by the pools endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pool {
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(alias = "token0Address", default, deserialize_with = "lenient_string")]
    pub token0_address: Option<String>,
    #[serde(alias = "token1Address", default, deserialize_with = "lenient_string")]
    pub token1_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reserve0: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reserve1: Option<String>,
    #[serde(alias = "lpTotalSupplyUsd", default, deserialize_with = "lenient_string")]
    pub lp_total_supply_usd: Option<String>,
    #[serde(alias = "lpTotalSupply", default, deserialize_with = "lenient_string")]
    pub lp_total_supply: Option<String>,
    #[serde(alias = "volume24hUsd", default, deserialize_with = "lenient_string")]
    pub volume_24h_usd: Option<String>,
    #[serde(alias = "apy1D", alias = "apy1d", default, deserialize_with = "lenient_string")]
    pub apy_1d: Option<String>,
    #[serde(alias = "popularityIndex", default, deserialize_with = "lenient_string")]
    pub popularity_index: Option<String>,
}

impl Pool {
    pub fn new(address: &str, token0: &str, token1: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            token0_address: Some(token0.to_string()),
            token1_address: Some(token1.to_string()),
            ..Default::default()
        }
    }

    pub fn with_reserves(mut self, reserve0: &str, reserve1: &str) -> Self {
        self.reserve0 = Some(reserve0.to_string());
        self.reserve1 = Some(reserve1.to_string());
        self
    }

    pub fn with_liquidity_usd(mut self, liquidity: &str) -> Self {
        self.lp_total_supply_usd = Some(liquidity.to_string());
        self
    }

    pub fn with_popularity(mut self, index: &str) -> Self {
        self.popularity_index = Some(index.to_string());
        self
    }

    /// Pool, token0 and token1 addresses when all three are present and non-empty.
    pub fn addresses(&self) -> Option<(&str, &str, &str)> {
        fn non_empty(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|a| !a.is_empty())
        }

        Some((
            non_empty(&self.address)?,
            non_empty(&self.token0_address)?,
            non_empty(&self.token1_address)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numbers_as_strings() {
        let pool: Pool = serde_json::from_str(
            r#"{"address":"P1","token0_address":"T0","token1Address":"T1","reserve0":100,"reserve1":"500","apy_1d":"0.12"}"#,
        ).unwrap();

        assert_eq!(pool.addresses(), Some(("P1", "T0", "T1")));
        assert_eq!(pool.reserve0.as_deref(), Some("100"));
        assert_eq!(pool.apy_1d.as_deref(), Some("0.12"));
        assert_eq!(pool.lp_total_supply_usd, None);
    }

    #[test]
    fn test_empty_address_is_unresolved() {
        let pool = Pool::new("P1", "", "T1");
        assert_eq!(pool.addresses(), None);

        let mut no_pool = Pool::new("P1", "T0", "T1");
        no_pool.address = None;
        assert_eq!(no_pool.addresses(), None);
    }
}
