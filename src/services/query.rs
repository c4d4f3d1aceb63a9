use std::cmp::Ordering;
use crate::models::TradingPair;
use super::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Liquidity,
    Volume,
    Apy,
    Name,
    Price,
}

impl SortKey {
    /// Unknown keys sort by liquidity.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "volume" | "volume24h" => SortKey::Volume,
            "apy" => SortKey::Apy,
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            _ => SortKey::Liquidity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Liquidity => "liquidity",
            SortKey::Volume => "volume",
            SortKey::Apy => "apy",
            SortKey::Name => "name",
            SortKey::Price => "price",
        }
    }

    /// Descending comparison on this key.
    fn compare_desc(&self, a: &TradingPair, b: &TradingPair) -> Ordering {
        match self {
            SortKey::Liquidity => b.liquidity.total_cmp(&a.liquidity),
            SortKey::Volume => b.volume_24h.total_cmp(&a.volume_24h),
            SortKey::Apy => b.apy.total_cmp(&a.apy),
            SortKey::Price => b.price.total_cmp(&a.price),
            SortKey::Name => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairFilters {
    pub search: String,
    pub min_liquidity: f64,
    pub category: Category,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl Default for PairFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_liquidity: 0.0,
            category: Category::All,
            sort_by: SortKey::Liquidity,
            sort_order: SortOrder::Desc,
        }
    }
}

/// Applies search, liquidity floor, category and sort, in that order.
///
/// The input is left untouched; the result borrows from it.
pub fn query_pairs<'a>(pairs: &'a [TradingPair], filters: &PairFilters) -> Vec<&'a TradingPair> {
    let mut result: Vec<&TradingPair> = pairs.iter().collect();

    let needle = filters.search.to_lowercase();
    if !needle.is_empty() {
        result.retain(|pair| matches_search(pair, &needle));
    }

    if filters.min_liquidity > 0.0 {
        result.retain(|pair| pair.liquidity >= filters.min_liquidity);
    }

    if filters.category != Category::All {
        result.retain(|pair| filters.category.matches(pair));
    }

    // Stable: equal keys keep the canonical order from derivation.
    result.sort_by(|a, b| filters.sort_by.compare_desc(a, b));
    if filters.sort_order == SortOrder::Asc {
        result.reverse();
    }

    result
}

fn matches_search(pair: &TradingPair, needle: &str) -> bool {
    [
        pair.name.as_str(),
        pair.token0.symbol.as_str(),
        pair.token1.symbol.as_str(),
        pair.token0.name.as_str(),
        pair.token1.name.as_str(),
        pair.pool_address.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
