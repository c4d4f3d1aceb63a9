pub mod asset;
pub mod pair;
pub mod pool;

pub use asset::Asset;
pub use pair::{PairToken, Reserves, TradingPair};
pub use pool::Pool;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Both upstream datasets, fetched together for one request or cache window.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub assets: Vec<Asset>,
    pub pools: Vec<Pool>,
}

/// Parses an upstream decimal string. Missing, unparseable or non-finite
/// values degrade to `0`.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Accepts a string, a number or null for fields the API sends as decimal strings.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
