use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use std::time::Duration;

use crate::config::DEFAULT_API_URL;
use crate::error::SearchError;
use crate::models::SearchResponse;

const SEARCH_PATH: &str = "/latest/dex/search";

/// Anything that can answer a text search with DexScreener's result shape
#[async_trait]
pub trait PairSearchApi: Send + Sync {
    /// Search pairs matching `query`
    async fn search_pairs(&self, query: &str) -> Result<SearchResponse, SearchError>;
}

/// Client for the public DexScreener search API
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    http: reqwest::Client,
    base_url: String,
}

impl DexScreenerClient {
    /// Create a client against the public API
    pub fn new() -> Result<Self, SearchError> {
        Self::with_base_url(DEFAULT_API_URL, None)
    }

    /// Create a client against a custom host, with an optional request timeout
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dex-pair-search/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `query`, with the query percent-encoded (`/` -> `%2F`, space -> `%20`)
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        let endpoint = format!("{}{}", self.base_url, SEARCH_PATH);
        let mut url = Url::parse_with_params(&endpoint, &[("q", query)])
            .map_err(|e| SearchError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        // Form encoding writes spaces as `+` and a literal `+` as `%2B`
        let encoded = url.query().map(|q| q.replace('+', "%20"));
        url.set_query(encoded.as_deref());
        Ok(url)
    }
}

#[async_trait]
impl PairSearchApi for DexScreenerClient {
    async fn search_pairs(&self, query: &str) -> Result<SearchResponse, SearchError> {
        if query.trim().is_empty() {
            debug!("Blank query, skipping request");
            return Ok(SearchResponse::empty());
        }

        let url = self.search_url(query)?;
        debug!("Requesting DexScreener search: {}", url);

        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown Status").to_string();
            warn!("DexScreener search returned {} for {:?}", status, query);
            return Err(SearchError::Http { status: status.as_u16(), status_text });
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        debug!(
            "DexScreener search {:?} returned {} pairs",
            query,
            parsed.pairs.as_ref().map(|p| p.len()).unwrap_or(0)
        );
        Ok(parsed)
    }
}
