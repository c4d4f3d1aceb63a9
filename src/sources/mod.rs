pub mod ston;

use async_trait::async_trait;
use crate::error::SourceError;
use crate::models::{Asset, MarketData, Pool};

/// Upstream provider of the asset and pool datasets.
#[async_trait]
pub trait DexSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_assets(&self) -> Result<Vec<Asset>, SourceError>;
    async fn fetch_pools(&self) -> Result<Vec<Pool>, SourceError>;
}

/// Fetches both datasets concurrently. Either failure fails the whole fetch.
pub async fn fetch_market_data(source: &dyn DexSource) -> Result<MarketData, SourceError> {
    let start = std::time::Instant::now();
    let (assets, pools) = futures::try_join!(source.fetch_assets(), source.fetch_pools())
        .map_err(|e| {
            tracing::warn!("Source {} fetch failed: {}", source.name(), e);
            e
        })?;

    tracing::info!(
        "Fetched {} assets and {} pools from {} ({:.2}s)",
        assets.len(),
        pools.len(),
        source.name(),
        start.elapsed().as_secs_f64()
    );

    Ok(MarketData { assets, pools })
}
