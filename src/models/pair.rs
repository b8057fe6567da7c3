use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema version reported for searches that never reached the API
pub const SENTINEL_SCHEMA_VERSION: &str = "1.0.0";

/// Body returned by `GET /latest/dex/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub schema_version: String,
    /// `None` means "no matches" and is kept distinct from an empty list
    #[serde(default)]
    pub pairs: Option<Vec<PairRecord>>,
}

impl SearchResponse {
    /// Result used for blank queries
    pub fn empty() -> Self {
        Self {
            schema_version: SENTINEL_SCHEMA_VERSION.to_string(),
            pairs: None,
        }
    }
}

/// A trading pair as reported by DexScreener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    pub chain_id: String,
    pub dex_id: String,
    pub url: String,
    pub pair_address: String,
    pub labels: Option<Vec<String>>,
    pub base_token: TokenInfo,
    pub quote_token: TokenInfo,
    pub price_native: String,
    pub price_usd: Option<String>,
    /// Buy/sell counts keyed by time bucket ("m5", "h1", "h24", ...)
    pub txns: Option<BTreeMap<String, TxnCounts>>,
    pub volume: Option<BTreeMap<String, f64>>,
    pub price_change: Option<BTreeMap<String, f64>>,
    pub liquidity: Option<Liquidity>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    /// Epoch milliseconds
    pub pair_created_at: Option<i64>,
    pub info: Option<PairInfo>,
    pub boosts: Option<Boosts>,
}

/// Information about a token in a pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxnCounts {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Liquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    pub image_url: Option<String>,
    pub websites: Option<Vec<Website>>,
    pub socials: Option<Vec<Social>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    pub platform: String,
    pub handle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boosts {
    pub active: Option<u32>,
}
