use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dex_pair_search::coordinator::{CoordinatorConfig, FetchOutcome, RetryConfig, SearchCoordinator};
use dex_pair_search::ui::{render_page, Locale, Palette, RenderContext, ViewStatus};
use dex_pair_search::{PairSearchApi, SearchError, SearchResponse, SearchStore};

/// Serves a canned DexScreener body with `count` pairs for any query
struct CannedApi {
    count: usize,
    calls: AtomicUsize,
}

fn pair_json(i: usize) -> String {
    format!(
        r#"{{
            "chainId": "solana",
            "dexId": "raydium",
            "url": "https://dexscreener.com/solana/pair{i}",
            "pairAddress": "pair{i}",
            "baseToken": {{"address": "base{i}", "name": "Token {i}", "symbol": "TK{i}"}},
            "quoteToken": {{"address": "usdc", "name": "USD Coin", "symbol": "USDC"}},
            "priceNative": "0.5",
            "priceUsd": "1.25",
            "volume": {{"h24": 1500}},
            "priceChange": {{"h24": {change}}},
            "liquidity": {{"usd": 25000}}
        }}"#,
        i = i,
        change = if i % 2 == 0 { 2.5 } else { -1.0 }
    )
}

#[async_trait]
impl PairSearchApi for CannedApi {
    async fn search_pairs(&self, query: &str) -> Result<SearchResponse, SearchError> {
        if query.trim().is_empty() {
            return Ok(SearchResponse::empty());
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let pairs: Vec<String> = (0..self.count).map(pair_json).collect();
        let body = format!(r#"{{"schemaVersion": "1.0.0", "pairs": [{}]}}"#, pairs.join(","));
        serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

fn setup(count: usize) -> (Arc<CannedApi>, SearchCoordinator) {
    let api = Arc::new(CannedApi { count, calls: AtomicUsize::new(0) });
    let store = Arc::new(SearchStore::default());
    let config = CoordinatorConfig {
        retry: RetryConfig { base_delay: std::time::Duration::ZERO, ..RetryConfig::default() },
        ..CoordinatorConfig::default()
    };
    let coordinator = SearchCoordinator::new(api.clone(), store, config);
    (api, coordinator)
}

#[tokio::test]
async fn test_search_then_paginate() {
    let (api, coordinator) = setup(30);

    let outcome = coordinator.search("SOL/USDC").await.unwrap();
    assert_eq!(outcome, FetchOutcome::Applied { pairs: 30, from_cache: false });
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);

    let store = coordinator.store();
    let state = store.snapshot();
    assert_eq!(state.paginator.total_pages(), 3);
    assert_eq!(state.paginator.current_page_items().len(), 12);

    store.go_to_last_page();
    let state = store.snapshot();
    assert_eq!(state.paginator.current_page(), 3);
    assert_eq!(state.paginator.page_range().start, 25);
    assert_eq!(state.paginator.page_range().end, 30);
    assert_eq!(state.paginator.current_page_items()[0].pair_name(), "TK24/USDC");

    // Same query within the freshness window: served from cache, page resets
    let outcome = coordinator.search("SOL/USDC").await.unwrap();
    assert_eq!(outcome, FetchOutcome::Applied { pairs: 30, from_cache: true });
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.snapshot().paginator.current_page(), 1);
}

#[tokio::test]
async fn test_rendered_page_reflects_store() {
    let (_, coordinator) = setup(5);
    coordinator.search("TK").await.unwrap();

    let ctx = RenderContext::new(Locale::Fr, Palette::plain());
    let page = render_page(&coordinator.store().snapshot(), &ViewStatus::Ready, true, &ctx);

    assert!(page.contains("Recherche de paires DexScreener"));
    assert!(page.contains("TK0/USDC"));
    assert!(page.contains("$25,000"));
    assert!(page.contains("$1.50K"));
    assert!(page.contains("+2.50%"));
    assert!(page.contains("-1.00%"));
    assert!(page.contains("Affichage de 1 à 5 sur 5 résultats"));
}
