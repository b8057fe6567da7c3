use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::dexscreener::PairSearchApi;
use crate::error::SearchError;
use crate::models::{PairToken, SearchResponse};
use crate::store::SearchStore;
use crate::utils::millis_to_duration;

type FetchResult = Result<Arc<SearchResponse>, Arc<SearchError>>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Retry policy for failed searches
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first failure
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further attempt
    pub base_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Backoff before retry number `attempt` (0-based), with up to 10% jitter
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let factor = 1u32 << attempt.min(16);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
        delay.mul_f64(1.0 + fastrand::f64() * 0.1)
    }
}

/// Settings for the fetch coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Cached results younger than this are served without a request
    pub stale_time: Duration,
    pub retry: RetryConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl From<&Config> for CoordinatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            stale_time: Duration::from_secs(config.stale_time_seconds),
            retry: RetryConfig {
                max_retries: config.fetch_retries,
                base_delay: millis_to_duration(config.retry_base_delay_ms),
                ..RetryConfig::default()
            },
        }
    }
}

/// What a search call did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Blank query, nothing requested
    Skipped,
    /// Results were written to the store
    Applied { pairs: usize, from_cache: bool },
    /// A newer search was issued while this one was running; the store was left alone
    Superseded,
}

struct CacheEntry {
    response: Arc<SearchResponse>,
    fetched_at: Instant,
}

/// Binds queries to the search API and feeds results into the store
///
/// Identical queries share one in-flight request and fresh results are served
/// from cache. Only the most recently issued search may write to the store.
pub struct SearchCoordinator {
    api: Arc<dyn PairSearchApi>,
    store: Arc<SearchStore>,
    config: CoordinatorConfig,
    cache: Mutex<HashMap<String, CacheEntry>>,
    in_flight: Mutex<HashMap<String, (u64, SharedFetch)>>,
    sequence: AtomicU64,
    next_fetch_id: AtomicU64,
    /// Held while checking the sequence and writing to the store
    apply_lock: Mutex<()>,
}

impl SearchCoordinator {
    pub fn new(api: Arc<dyn PairSearchApi>, store: Arc<SearchStore>, config: CoordinatorConfig) -> Self {
        Self {
            api,
            store,
            config,
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            next_fetch_id: AtomicU64::new(0),
            apply_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<SearchStore> {
        &self.store
    }

    /// Run a search, using a fresh cached result when there is one
    pub async fn search(&self, query: &str) -> Result<FetchOutcome, Arc<SearchError>> {
        self.run(query, false).await
    }

    /// Run a search ignoring the cache (retry action)
    pub async fn refetch(&self, query: &str) -> Result<FetchOutcome, Arc<SearchError>> {
        self.run(query, true).await
    }

    /// Whether `query` has a cached result inside the freshness window
    pub fn is_fresh(&self, query: &str) -> bool {
        self.cached(query).is_some()
    }

    /// Drop every cached result
    pub fn invalidate(&self) {
        lock(&self.cache).clear();
    }

    async fn run(&self, query: &str, bypass_cache: bool) -> Result<FetchOutcome, Arc<SearchError>> {
        if query.trim().is_empty() {
            debug!("Blank query, nothing to fetch");
            return Ok(FetchOutcome::Skipped);
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        if !bypass_cache {
            if let Some(response) = self.cached(query) {
                debug!("Serving {:?} from cache", query);
                return Ok(match self.apply_if_latest(sequence, &response) {
                    Some(pairs) => FetchOutcome::Applied { pairs, from_cache: true },
                    None => FetchOutcome::Superseded,
                });
            }
        }

        let result = self.fetch_shared(query).await;

        let response = match result {
            Ok(response) => response,
            Err(e) if self.is_latest(sequence) => return Err(e),
            Err(e) => {
                info!("Search {:?} superseded by a newer search (failed: {})", query, e);
                return Ok(FetchOutcome::Superseded);
            }
        };

        match self.apply_if_latest(sequence, &response) {
            Some(pairs) => Ok(FetchOutcome::Applied { pairs, from_cache: false }),
            None => {
                info!("Search {:?} superseded by a newer search", query);
                Ok(FetchOutcome::Superseded)
            }
        }
    }

    fn is_latest(&self, sequence: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == sequence
    }

    /// Write `response` to the store unless a newer search has been issued.
    /// The check and the write happen under one lock.
    fn apply_if_latest(&self, sequence: u64, response: &SearchResponse) -> Option<usize> {
        let _guard = lock(&self.apply_lock);
        if !self.is_latest(sequence) {
            return None;
        }
        Some(self.apply(response))
    }

    fn cached(&self, query: &str) -> Option<Arc<SearchResponse>> {
        let cache = lock(&self.cache);
        cache
            .get(query)
            .filter(|entry| entry.fetched_at.elapsed() < self.config.stale_time)
            .map(|entry| entry.response.clone())
    }

    async fn fetch_shared(&self, query: &str) -> FetchResult {
        let (fetch_id, fetch) = {
            let mut in_flight = lock(&self.in_flight);
            match in_flight.get(query) {
                Some(existing) => {
                    debug!("Joining in-flight search for {:?}", query);
                    existing.clone()
                }
                None => {
                    let fetch_id = self.next_fetch_id.fetch_add(1, Ordering::SeqCst);
                    let api = self.api.clone();
                    let retry = self.config.retry.clone();
                    let owned_query = query.to_string();
                    let fetch = async move {
                        fetch_with_retry(api.as_ref(), &owned_query, &retry)
                            .await
                            .map(Arc::new)
                            .map_err(Arc::new)
                    }
                    .boxed()
                    .shared();
                    in_flight.insert(query.to_string(), (fetch_id, fetch.clone()));
                    (fetch_id, fetch)
                }
            }
        };

        let result = fetch.await;

        {
            let mut in_flight = lock(&self.in_flight);
            if in_flight.get(query).map(|(id, _)| *id) == Some(fetch_id) {
                in_flight.remove(query);
            }
        }

        if let Ok(response) = &result {
            let stale_time = self.config.stale_time;
            let mut cache = lock(&self.cache);
            cache.retain(|_, entry| entry.fetched_at.elapsed() < stale_time);
            cache.insert(
                query.to_string(),
                CacheEntry { response: response.clone(), fetched_at: Instant::now() },
            );
        }

        result
    }

    fn apply(&self, response: &SearchResponse) -> usize {
        match &response.pairs {
            Some(records) => {
                let tokens: Vec<PairToken> = records.iter().cloned().map(PairToken::from_record).collect();
                let count = tokens.len();
                self.store.set_pairs(tokens);
                count
            }
            None => {
                self.store.set_pairs(Vec::new());
                0
            }
        }
    }
}

async fn fetch_with_retry(
    api: &dyn PairSearchApi,
    query: &str,
    retry: &RetryConfig,
) -> Result<SearchResponse, SearchError> {
    let mut attempt = 0;
    loop {
        match api.search_pairs(query).await {
            Ok(response) => return Ok(response),
            Err(e) if attempt < retry.max_retries => {
                let delay = retry.delay_for(attempt);
                warn!(
                    "Search {:?} failed (attempt {}/{}): {}, retrying in {:?}",
                    query,
                    attempt + 1,
                    retry.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
