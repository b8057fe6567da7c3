use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::models::pair::{Boosts, Liquidity, PairInfo, PairRecord, TokenInfo, TxnCounts};
use crate::utils::{group_thousands, millis_to_datetime};

/// Time-bucket keys for the last 24 hours, in lookup order
const KEYS_24H: [&str; 2] = ["h24", "24h"];

/// Placeholder shown for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// Immutable view of a pair, built once from the API record
#[derive(Debug, Clone, PartialEq)]
pub struct PairToken {
    chain_id: String,
    dex_id: String,
    url: String,
    pair_address: String,
    labels: Vec<String>,
    base_token: TokenInfo,
    quote_token: TokenInfo,
    price_native: String,
    price_usd: Option<String>,
    txns: BTreeMap<String, TxnCounts>,
    volume: BTreeMap<String, f64>,
    price_change: BTreeMap<String, f64>,
    liquidity: Option<Liquidity>,
    fdv: Option<f64>,
    market_cap: Option<f64>,
    pair_created_at: Option<i64>,
    info: Option<PairInfo>,
    boosts: Option<Boosts>,
}

impl PairToken {
    /// Map a raw DexScreener record. Missing optional fields never fail.
    pub fn from_record(record: PairRecord) -> Self {
        Self {
            chain_id: record.chain_id,
            dex_id: record.dex_id,
            url: record.url,
            pair_address: record.pair_address,
            labels: record.labels.unwrap_or_default(),
            base_token: record.base_token,
            quote_token: record.quote_token,
            price_native: record.price_native,
            price_usd: record.price_usd,
            txns: record.txns.unwrap_or_default(),
            volume: record.volume.unwrap_or_default(),
            price_change: record.price_change.unwrap_or_default(),
            liquidity: record.liquidity,
            fdv: record.fdv,
            market_cap: record.market_cap,
            pair_created_at: record.pair_created_at,
            info: record.info,
            boosts: record.boosts,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn dex_id(&self) -> &str {
        &self.dex_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Identity key within one result set
    pub fn pair_address(&self) -> &str {
        &self.pair_address
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn base_token(&self) -> &TokenInfo {
        &self.base_token
    }

    pub fn quote_token(&self) -> &TokenInfo {
        &self.quote_token
    }

    pub fn price_native(&self) -> &str {
        &self.price_native
    }

    pub fn price_usd(&self) -> Option<&str> {
        self.price_usd.as_deref()
    }

    pub fn txns(&self) -> &BTreeMap<String, TxnCounts> {
        &self.txns
    }

    pub fn volume(&self) -> &BTreeMap<String, f64> {
        &self.volume
    }

    pub fn price_change(&self) -> &BTreeMap<String, f64> {
        &self.price_change
    }

    pub fn liquidity(&self) -> Option<&Liquidity> {
        self.liquidity.as_ref()
    }

    pub fn fdv(&self) -> Option<f64> {
        self.fdv
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.market_cap
    }

    pub fn pair_created_at(&self) -> Option<i64> {
        self.pair_created_at
    }

    pub fn info(&self) -> Option<&PairInfo> {
        self.info.as_ref()
    }

    pub fn boosts(&self) -> Option<&Boosts> {
        self.boosts.as_ref()
    }

    /// `BASE/QUOTE`
    pub fn pair_name(&self) -> String {
        format!("{}/{}", self.base_token.symbol, self.quote_token.symbol)
    }

    /// `$<price>` or `N/A`
    pub fn formatted_price_usd(&self) -> String {
        match self.price_usd.as_deref() {
            Some(price) if !price.is_empty() => format!("${}", price),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn volume_24h(&self) -> f64 {
        bucket_24h(&self.volume)
    }

    pub fn price_change_24h(&self) -> f64 {
        bucket_24h(&self.price_change)
    }

    /// USD liquidity with thousands separators, `N/A` when absent or zero
    pub fn formatted_liquidity(&self) -> String {
        match self.liquidity.and_then(|l| l.usd) {
            Some(usd) if usd != 0.0 && usd.is_finite() => format!("${}", group_thousands(usd, 3)),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Flat and falling prices both count as not increasing
    pub fn is_price_increasing(&self) -> bool {
        self.price_change_24h() > 0.0
    }

    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        match self.pair_created_at {
            Some(ms) if ms != 0 => millis_to_datetime(ms),
            _ => None,
        }
    }
}

impl From<PairRecord> for PairToken {
    fn from(record: PairRecord) -> Self {
        Self::from_record(record)
    }
}

fn bucket_24h(map: &BTreeMap<String, f64>) -> f64 {
    KEYS_24H
        .iter()
        .find_map(|key| map.get(*key).copied())
        .unwrap_or(0.0)
}

/// Shared fixture for tests across the crate
#[cfg(test)]
pub(crate) fn test_record(address: &str) -> PairRecord {
    PairRecord {
        chain_id: "solana".to_string(),
        dex_id: "raydium".to_string(),
        url: format!("https://dexscreener.com/solana/{}", address),
        pair_address: address.to_string(),
        labels: None,
        base_token: TokenInfo {
            address: "So11111111111111111111111111111111111111112".to_string(),
            name: "Wrapped SOL".to_string(),
            symbol: "SOL".to_string(),
        },
        quote_token: TokenInfo {
            address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            name: "USD Coin".to_string(),
            symbol: "USDC".to_string(),
        },
        price_native: "150.5".to_string(),
        price_usd: None,
        txns: None,
        volume: None,
        price_change: None,
        liquidity: None,
        fdv: None,
        market_cap: None,
        pair_created_at: None,
        info: None,
        boosts: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> PairRecord {
        let mut record = test_record("pair1");
        record.price_usd = Some("150.50".to_string());
        record.volume = Some(BTreeMap::from([("h24".to_string(), 1_000_000.0), ("h6".to_string(), 10.0)]));
        record.price_change = Some(BTreeMap::from([("h24".to_string(), 5.5)]));
        record.liquidity = Some(Liquidity { usd: Some(500_000.0), base: Some(1000.0), quote: Some(150_000.0) });
        record.market_cap = Some(8_000_000.0);
        record.pair_created_at = Some(1_700_000_000_000);
        record
    }

    #[test]
    fn test_mandatory_fields_only_degrade_to_defaults() {
        let token = PairToken::from_record(test_record("pair1"));

        assert_eq!(token.formatted_price_usd(), "N/A");
        assert_eq!(token.volume_24h(), 0.0);
        assert_eq!(token.price_change_24h(), 0.0);
        assert_eq!(token.formatted_liquidity(), "N/A");
        assert_eq!(token.created_date(), None);
        assert!(!token.is_price_increasing());
        assert!(token.labels().is_empty());
    }

    #[test]
    fn test_derived_accessors() {
        let token = PairToken::from(full_record());

        assert_eq!(token.pair_name(), "SOL/USDC");
        assert_eq!(token.formatted_price_usd(), "$150.50");
        assert_eq!(token.volume_24h(), 1_000_000.0);
        assert_eq!(token.price_change_24h(), 5.5);
        assert_eq!(token.formatted_liquidity(), "$500,000");
        assert!(token.is_price_increasing());
        assert_eq!(token.created_date().unwrap().timestamp_millis(), 1_700_000_000_000);
        assert_eq!(token.pair_address(), "pair1");
    }

    #[test]
    fn test_24h_bucket_accepts_either_key_form() {
        let mut record = test_record("pair1");
        record.volume = Some(BTreeMap::from([("24h".to_string(), 42.0)]));
        record.price_change = Some(BTreeMap::from([("6h".to_string(), 3.0)]));
        let token = PairToken::from_record(record);

        assert_eq!(token.volume_24h(), 42.0);
        assert_eq!(token.price_change_24h(), 0.0);
        assert_eq!(token.price_change()["6h"], 3.0);
    }

    #[test]
    fn test_zero_and_negative_change_are_not_increasing() {
        let mut record = test_record("pair1");
        record.price_change = Some(BTreeMap::from([("h24".to_string(), 0.0)]));
        assert!(!PairToken::from_record(record.clone()).is_price_increasing());

        record.price_change = Some(BTreeMap::from([("h24".to_string(), -3.5)]));
        assert!(!PairToken::from_record(record).is_price_increasing());
    }

    #[test]
    fn test_zero_liquidity_and_timestamp_are_not_available() {
        let mut record = test_record("pair1");
        record.liquidity = Some(Liquidity { usd: Some(0.0), base: None, quote: None });
        record.pair_created_at = Some(0);
        record.price_usd = Some(String::new());
        let token = PairToken::from_record(record);

        assert_eq!(token.formatted_liquidity(), "N/A");
        assert_eq!(token.created_date(), None);
        assert_eq!(token.formatted_price_usd(), "N/A");
    }

    #[test]
    fn test_fractional_liquidity_keeps_three_decimals() {
        let mut record = test_record("pair1");
        record.liquidity = Some(Liquidity { usd: Some(1234.5678), base: None, quote: None });
        assert_eq!(PairToken::from_record(record).formatted_liquidity(), "$1,234.568");
    }
}
