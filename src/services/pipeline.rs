use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::config::QueryConfig;
use crate::models::{MarketData, TradingPair};
use super::category::Category;
use super::deriver::derive_pairs;
use super::paginate::{paginate, Pagination};
use super::query::{query_pairs, PairFilters, SortKey, SortOrder};

/// Parsed `/api/pairs` query. Construction never fails: anything that does
/// not parse takes its default.
#[derive(Debug, Clone, PartialEq)]
pub struct PairQuery {
    pub page: usize,
    pub limit: usize,
    pub filters: PairFilters,
}

impl PairQuery {
    pub fn from_params(params: &HashMap<String, String>, config: &QueryConfig) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let page = get("page")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);

        let limit = get("limit")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit.max(1));

        let min_liquidity = get("minLiquidity")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        Self {
            page,
            limit,
            filters: PairFilters {
                search: params.get("search").cloned().unwrap_or_default(),
                min_liquidity,
                category: get("category").map(Category::parse).unwrap_or(Category::All),
                sort_by: get("sortBy").map(SortKey::parse).unwrap_or(SortKey::Liquidity),
                sort_order: get("sortOrder").map(SortOrder::parse).unwrap_or(SortOrder::Desc),
            },
        }
    }
}

/// Filters echoed back in the response, in their parsed form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub search: String,
    pub sort_by: &'static str,
    pub sort_order: &'static str,
    pub min_liquidity: f64,
    pub category: Category,
}

impl From<&PairFilters> for FilterEcho {
    fn from(filters: &PairFilters) -> Self {
        Self {
            search: filters.search.clone(),
            sort_by: filters.sort_by.as_str(),
            sort_order: filters.sort_order.as_str(),
            min_liquidity: filters.min_liquidity,
            category: filters.category,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairsResponse {
    pub success: bool,
    pub data: Vec<TradingPair>,
    pub pagination: Pagination,
    pub filters: FilterEcho,
    /// Derived pairs before any filter; the filtered count is `pagination.totalItems`.
    pub total_pairs: usize,
    pub last_updated: DateTime<Utc>,
}

/// Derive, query and paginate in one pass over already fetched data.
pub fn run_query(data: &MarketData, query: &PairQuery, last_updated: DateTime<Utc>) -> PairsResponse {
    let pairs = derive_pairs(&data.assets, &data.pools);
    let filtered = query_pairs(&pairs, &query.filters);
    let page = paginate(filtered, query.page, query.limit);

    tracing::debug!(
        "Pairs query page={} limit={} matched {}/{}",
        query.page,
        query.limit,
        page.pagination.total_items,
        pairs.len()
    );

    PairsResponse {
        success: true,
        data: page.data.into_iter().cloned().collect(),
        pagination: page.pagination,
        filters: FilterEcho::from(&query.filters),
        total_pairs: pairs.len(),
        last_updated,
    }
}

/// Looks up one derived pair by pool address.
pub fn find_pair(data: &MarketData, address: &str) -> Option<TradingPair> {
    derive_pairs(&data.assets, &data.pools)
        .into_iter()
        .find(|pair| pair.pool_address == address)
}
