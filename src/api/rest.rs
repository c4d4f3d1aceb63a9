use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use crate::config::QueryConfig;
use crate::error::ApiError;
use crate::services::{find_pair, run_query, Category, MetadataCache, PairQuery, PairsResponse};
use crate::sources::DexSource;

pub struct AppState {
    pub source: Arc<dyn DexSource>,
    pub cache: MetadataCache,
    pub query: QueryConfig,
}

/// GET /api/pairs
pub async fn list_pairs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PairsResponse>, ApiError> {
    let entry = state.cache.get_or_refresh(state.source.as_ref()).await?;
    let query = PairQuery::from_params(&params, &state.query);
    Ok(Json(run_query(&entry.value, &query, entry.last_updated)))
}

/// GET /api/pairs/:address
pub async fn get_pair(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entry = state.cache.get_or_refresh(state.source.as_ref()).await?;
    let pair = find_pair(&entry.value, &address).ok_or(ApiError::NotFound(address))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": pair,
        "lastUpdated": entry.last_updated,
    })))
}

/// GET /api/categories
async fn categories() -> Json<serde_json::Value> {
    let list: Vec<serde_json::Value> = Category::VARIANTS
        .iter()
        .map(|c| serde_json::json!({ "id": c.as_str(), "keywords": c.keywords() }))
        .collect();
    Json(serde_json::json!({ "success": true, "data": list }))
}

/// GET /api/stats
async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let entry = state.cache.get_or_refresh(state.source.as_ref()).await?;
    let pairs = crate::services::derive_pairs(&entry.value.assets, &entry.value.pools);

    Ok(Json(serde_json::json!({
        "success": true,
        "source": state.source.name(),
        "assets": entry.value.assets.len(),
        "pools": entry.value.pools.len(),
        "pairs": pairs.len(),
        "cacheTtlSecs": state.cache.ttl().as_secs(),
        "cacheAgeSecs": state.cache.age_secs(Utc::now()),
        "lastUpdated": entry.last_updated,
    })))
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

pub fn create_rest_router(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/api/pairs", get(list_pairs))
        .route("/api/pairs/:address", get(get_pair))
        .route("/api/categories", get(categories))
        .route("/api/stats", get(stats))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use crate::models::{Asset, Pool};
    use crate::sources::mock::MockSource;

    fn state_with(source: MockSource) -> Arc<AppState> {
        Arc::new(AppState {
            source: Arc::new(source),
            cache: MetadataCache::new(60),
            query: QueryConfig::default(),
        })
    }

    fn ton_market() -> MockSource {
        MockSource::new(
            vec![
                Asset::new("T0", "TON", "Toncoin", 9).with_usd_price("5"),
                Asset::new("T1", "STON", "STON", 9).with_usd_price("1"),
            ],
            vec![
                Pool::new("P1", "T0", "T1").with_reserves("100", "500").with_liquidity_usd("1000"),
                Pool::new("P2", "T0", "GONE"),
            ],
        )
    }

    #[tokio::test]
    async fn test_list_pairs() {
        let state = state_with(ton_market());
        let params = HashMap::from([("search".to_string(), "ston".to_string())]);

        let Json(response) = list_pairs(State(state), Query(params)).await.unwrap();
        assert_eq!(response.total_pairs, 1);
        assert_eq!(response.data[0].formatted_price, "0.2000");
        assert_eq!(response.filters.search, "ston");
    }

    #[tokio::test]
    async fn test_get_pair_not_found() {
        let state = state_with(ton_market());

        let Json(found) = get_pair(State(state.clone()), Path("P1".to_string())).await.unwrap();
        assert_eq!(found["data"]["name"], "TON/STON");

        let missing = get_pair(State(state), Path("P2".to_string())).await.unwrap_err();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let state = state_with(MockSource::failing());

        let err = list_pairs(State(state), Query(HashMap::new())).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_categories_lists_all_variants() {
        let Json(body) = categories().await;
        assert_eq!(body["data"].as_array().map(|a| a.len()), Some(4));
        assert_eq!(body["data"][1]["id"], "stablecoins");
    }
}
