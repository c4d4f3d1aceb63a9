use std::collections::HashMap;
use crate::models::{parse_amount, Asset, PairToken, Pool, Reserves, TradingPair};
use super::price::format_price;

/// Decimals assumed for a token that does not report them.
pub const DEFAULT_DECIMALS: u32 = 9;

/// Joins pools with their assets and orders the result by liquidity, then
/// popularity, both descending.
///
/// Pools whose addresses are missing or whose tokens are not in `assets` are
/// skipped. Nothing in a single record can fail the whole batch.
pub fn derive_pairs(assets: &[Asset], pools: &[Pool]) -> Vec<TradingPair> {
    let by_address: HashMap<&str, &Asset> = assets
        .iter()
        .filter_map(|asset| asset.address().map(|addr| (addr, asset)))
        .collect();

    let mut pairs: Vec<TradingPair> = pools
        .iter()
        .filter_map(|pool| {
            let (pool_address, token0_address, token1_address) = pool.addresses()?;
            let token0 = by_address.get(token0_address)?;
            let token1 = by_address.get(token1_address)?;
            Some(build_pair(pool, pool_address, token0, token1))
        })
        .collect();

    let dropped = pools.len() - pairs.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} of {} pools with unresolved tokens", dropped, pools.len());
    }

    pairs.sort_by(|a, b| {
        b.liquidity
            .total_cmp(&a.liquidity)
            .then_with(|| b.popularity_index.total_cmp(&a.popularity_index))
    });

    pairs
}

/// Price of token0 in token1: USD price ratio when both sides are priced,
/// otherwise the decimal-adjusted reserve ratio.
pub fn pool_price(token0: &Asset, token1: &Asset, pool: &Pool) -> f64 {
    let usd0 = parse_amount(token0.dex_usd_price.as_deref());
    let usd1 = parse_amount(token1.dex_usd_price.as_deref());
    let reserve0 = parse_amount(pool.reserve0.as_deref());
    let reserve1 = parse_amount(pool.reserve1.as_deref());

    let price = if usd0 > 0.0 && usd1 > 0.0 {
        usd1 / usd0
    } else if reserve0 > 0.0 {
        let decimals0 = i64::from(token0.decimals.unwrap_or(DEFAULT_DECIMALS));
        let decimals1 = i64::from(token1.decimals.unwrap_or(DEFAULT_DECIMALS));
        let exponent = (decimals0 - decimals1).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        (reserve1 / reserve0) * 10f64.powi(exponent)
    } else {
        0.0
    };

    if price.is_finite() && price > 0.0 { price } else { 0.0 }
}

fn build_pair(pool: &Pool, pool_address: &str, token0: &Asset, token1: &Asset) -> TradingPair {
    let side0 = pair_token(token0);
    let side1 = pair_token(token1);
    let price = pool_price(token0, token1, pool);

    let liquidity = pool
        .lp_total_supply_usd
        .as_deref()
        .or(pool.lp_total_supply.as_deref());

    TradingPair {
        id: pool_address.to_string(),
        name: format!("{}/{}", side0.symbol, side1.symbol),
        price,
        formatted_price: format_price(price),
        liquidity: parse_amount(liquidity),
        volume_24h: parse_amount(pool.volume_24h_usd.as_deref()),
        apy: parse_amount(pool.apy_1d.as_deref()),
        pool_address: pool_address.to_string(),
        reserves: Reserves {
            token0: parse_amount(pool.reserve0.as_deref()),
            token1: parse_amount(pool.reserve1.as_deref()),
        },
        popularity_index: parse_amount(pool.popularity_index.as_deref()),
        token0: side0,
        token1: side1,
    }
}

fn pair_token(asset: &Asset) -> PairToken {
    PairToken {
        symbol: asset.symbol.clone().unwrap_or_default(),
        name: asset.display_name.clone().unwrap_or_default(),
        address: asset.contract_address.clone().unwrap_or_default(),
        decimals: asset.decimals.unwrap_or(DEFAULT_DECIMALS),
        usd_price: parse_amount(asset.dex_usd_price.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced_assets() -> Vec<Asset> {
        vec![
            Asset::new("T0", "TON", "Toncoin", 9).with_usd_price("5"),
            Asset::new("T1", "STON", "STON", 9).with_usd_price("1"),
        ]
    }

    fn unpriced_assets() -> Vec<Asset> {
        vec![
            Asset::new("T0", "TON", "Toncoin", 9),
            Asset::new("T1", "STON", "STON", 9),
        ]
    }

    fn scenario_pool() -> Pool {
        Pool::new("P1", "T0", "T1")
            .with_reserves("100", "500")
            .with_liquidity_usd("1000")
    }

    #[test]
    fn test_usd_price_ratio() {
        let pairs = derive_pairs(&priced_assets(), &[scenario_pool()]);

        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.id, "P1");
        assert_eq!(pair.name, "TON/STON");
        assert!((pair.price - 0.2).abs() < 1e-12);
        assert_eq!(pair.formatted_price, "0.2000");
        assert_eq!(pair.liquidity, 1000.0);
        assert_eq!(pair.reserves, Reserves { token0: 100.0, token1: 500.0 });
        assert_eq!(pair.token0.usd_price, 5.0);
    }

    #[test]
    fn test_reserve_ratio_fallback() {
        let pairs = derive_pairs(&unpriced_assets(), &[scenario_pool()]);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].price, 5.0);
        assert_eq!(pairs[0].formatted_price, "5.00");
    }

    #[test]
    fn test_reserve_ratio_adjusts_decimals() {
        let assets = vec![
            Asset::new("T0", "TON", "Toncoin", 9),
            Asset::new("T1", "USDT", "Tether USD", 6),
        ];
        let pool = Pool::new("P1", "T0", "T1").with_reserves("1000000000", "5000000");

        let pairs = derive_pairs(&assets, &[pool]);
        assert!((pairs[0].price - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_decimals_default_to_nine() {
        let mut assets = unpriced_assets();
        assets[0].decimals = None;
        assets[1].decimals = Some(6);
        let pool = Pool::new("P1", "T0", "T1").with_reserves("1", "1");

        let pairs = derive_pairs(&assets, &[pool]);
        assert!((pairs[0].price - 1000.0).abs() < 1e-9);
        assert_eq!(pairs[0].token0.decimals, DEFAULT_DECIMALS);
    }

    #[test]
    fn test_absurd_decimals_degrade_without_panic() {
        let assets = vec![
            Asset::new("T0", "TON", "Toncoin", i32::MAX as u32),
            Asset::new("T1", "STON", "STON", u32::MAX),
        ];
        let pools = vec![
            Pool::new("P1", "T0", "T1").with_reserves("1", "1"),
            Pool::new("P2", "T1", "T0").with_reserves("1", "1"),
        ];

        let pairs = derive_pairs(&assets, &pools);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.price.is_finite() && p.price >= 0.0));
    }

    #[test]
    fn test_zero_price_without_prices_or_reserves() {
        let pool = Pool::new("P1", "T0", "T1");
        let pairs = derive_pairs(&unpriced_assets(), &[pool]);

        assert_eq!(pairs[0].price, 0.0);
        assert_eq!(pairs[0].formatted_price, "0.00");
        assert_eq!(pairs[0].liquidity, 0.0);
    }

    #[test]
    fn test_price_never_negative() {
        let pool = Pool::new("P1", "T0", "T1").with_reserves("10", "-50");
        let mut assets = unpriced_assets();
        assets[1].dex_usd_price = Some("-3".to_string());

        let pairs = derive_pairs(&assets, &[pool]);
        assert_eq!(pairs[0].price, 0.0);
    }

    #[test]
    fn test_unresolved_token_drops_pool() {
        let pools = vec![
            scenario_pool(),
            Pool::new("P2", "T0", "MISSING").with_liquidity_usd("5000"),
            Pool::new("", "T0", "T1"),
        ];

        let pairs = derive_pairs(&priced_assets(), &pools);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].id, "P1");
    }

    #[test]
    fn test_liquidity_falls_back_to_lp_supply() {
        let mut pool = Pool::new("P1", "T0", "T1");
        pool.lp_total_supply = Some("42".to_string());

        let pairs = derive_pairs(&priced_assets(), &[pool]);
        assert_eq!(pairs[0].liquidity, 42.0);
    }

    #[test]
    fn test_canonical_order() {
        let pools = vec![
            Pool::new("LOW", "T0", "T1").with_liquidity_usd("10"),
            Pool::new("HIGH_UNPOPULAR", "T0", "T1").with_liquidity_usd("500").with_popularity("1"),
            Pool::new("HIGH_POPULAR", "T0", "T1").with_liquidity_usd("500").with_popularity("9"),
            Pool::new("MID", "T1", "T0").with_liquidity_usd("100"),
        ];

        let ids: Vec<String> = derive_pairs(&priced_assets(), &pools)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["HIGH_POPULAR", "HIGH_UNPOPULAR", "MID", "LOW"]);
    }

    #[test]
    fn test_duplicate_asset_last_write_wins() {
        let mut assets = priced_assets();
        assets.push(Asset::new("T1", "STON2", "Second", 9).with_usd_price("1"));

        let pairs = derive_pairs(&assets, &[scenario_pool()]);
        assert_eq!(pairs[0].name, "TON/STON2");
    }

    #[test]
    fn test_idempotent() {
        let pools = vec![scenario_pool(), Pool::new("P2", "T1", "T0").with_reserves("3", "7")];
        let first = derive_pairs(&priced_assets(), &pools);
        let second = derive_pairs(&priced_assets(), &pools);
        assert_eq!(first, second);
    }
}
