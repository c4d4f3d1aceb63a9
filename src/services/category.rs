use serde::Serialize;
use crate::models::TradingPair;

const STABLECOIN_KEYWORDS: &[&str] = &[
    "usdt", "usd", "usdc", "dai", "busd", "tusd", "tether", "usd coin",
];

const MEME_KEYWORDS: &[&str] = &[
    "not", "notcoin", "hmstr", "hamster", "dogs", "dog", "fish", "tpet",
    "doge", "shib", "pepe", "wojak", "cat", "duck", "frog", "bear",
    "meme", "moon", "inu", "floki", "elon", "baby", "safe", "rocket",
];

const DEFI_KEYWORDS: &[&str] = &[
    "ton", "ston", "hton", "tston", "uni", "cake", "aave", "comp", "curve", "bal",
    "sushi", "1inch", "dedust", "storm", "lp", "pool", "defi", "staked", "liquid", "vault",
];

/// Keyword bucket a pair can be browsed under.
///
/// Matching is a substring heuristic over token symbols and display names,
/// so unrelated tokens that happen to contain a keyword are classified too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Stablecoins,
    Meme,
    Defi,
}

impl Category {
    pub const VARIANTS: [Category; 4] = [
        Category::All,
        Category::Stablecoins,
        Category::Meme,
        Category::Defi,
    ];

    /// Unknown values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "stablecoins" => Category::Stablecoins,
            "meme" => Category::Meme,
            "defi" => Category::Defi,
            _ => Category::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Stablecoins => "stablecoins",
            Category::Meme => "meme",
            Category::Defi => "defi",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::All => &[],
            Category::Stablecoins => STABLECOIN_KEYWORDS,
            Category::Meme => MEME_KEYWORDS,
            Category::Defi => DEFI_KEYWORDS,
        }
    }

    pub fn matches(&self, pair: &TradingPair) -> bool {
        if *self == Category::All {
            return true;
        }

        let symbols = format!("{}{}", pair.token0.symbol, pair.token1.symbol).to_lowercase();
        let names = format!("{}{}", pair.token0.name, pair.token1.name).to_lowercase();

        self.keywords()
            .iter()
            .any(|keyword| symbols.contains(keyword) || names.contains(keyword))
    }
}
