use serde::Serialize;

/// One side of a trading pair, resolved from the asset list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairToken {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u32,
    pub usd_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reserves {
    pub token0: f64,
    pub token1: f64,
}

/// Display-ready join of a pool with its two assets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub id: String,
    pub name: String,
    pub token0: PairToken,
    pub token1: PairToken,
    /// token1 per token0
    pub price: f64,
    pub formatted_price: String,
    pub liquidity: f64,
    pub volume_24h: f64,
    pub apy: f64,
    pub pool_address: String,
    pub reserves: Reserves,
    pub popularity_index: f64,
}
