use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use crate::error::SourceError;
use crate::models::MarketData;
use crate::sources::{fetch_market_data, DexSource};

#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub value: Arc<MarketData>,
    pub last_updated: DateTime<Utc>,
}

impl CachedEntry {
    /// A zero `ttl` is never valid.
    pub fn is_valid(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if ttl.is_zero() {
            return false;
        }
        match (now - self.last_updated).to_std() {
            Ok(age) => age < ttl,
            // last_updated in the future: clock moved backwards
            Err(_) => true,
        }
    }
}

/// Process-wide cache of the raw upstream datasets for the long-running server.
pub struct MetadataCache {
    entry: RwLock<Option<CachedEntry>>,
    // serialises upstream refreshes so a cold cache is fetched once
    refresh: Mutex<()>,
    ttl: Duration,
}

impl MetadataCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub fn get_valid(&self, now: DateTime<Utc>) -> Option<CachedEntry> {
        match &*self.entry.read() {
            Some(entry) if entry.is_valid(now, self.ttl) => Some(entry.clone()),
            _ => None,
        }
    }

    pub fn store(&self, value: MarketData, now: DateTime<Utc>) -> CachedEntry {
        let entry = CachedEntry {
            value: Arc::new(value),
            last_updated: now,
        };
        *self.entry.write() = Some(entry.clone());
        entry
    }

    /// Returns the cached datasets while valid, otherwise refetches them.
    /// A failed refetch leaves the previous entry in place.
    pub async fn get_or_refresh(&self, source: &dyn DexSource) -> Result<CachedEntry, SourceError> {
        if let Some(entry) = self.get_valid(Utc::now()) {
            tracing::debug!("Metadata cache hit (updated {})", entry.last_updated);
            return Ok(entry);
        }

        let _guard = self.refresh.lock().await;
        if let Some(entry) = self.get_valid(Utc::now()) {
            return Ok(entry);
        }

        tracing::debug!("Metadata cache miss, fetching from {}", source.name());
        let data = fetch_market_data(source).await?;
        Ok(self.store(data, Utc::now()))
    }

    /// Seconds since the last successful refresh.
    pub fn age_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        match &*self.entry.read() {
            Some(entry) => Some((now - entry.last_updated).num_seconds()),
            None => None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
