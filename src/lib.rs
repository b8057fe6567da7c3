pub mod config;
pub mod coordinator;
pub mod dexscreener;
pub mod error;
pub mod models;
pub mod pagination;
pub mod store;
pub mod ui;
pub mod utils;

pub use coordinator::{FetchOutcome, SearchCoordinator};
pub use dexscreener::{DexScreenerClient, PairSearchApi};
pub use error::{SearchError, ValidationError};
pub use models::{PairRecord, PairToken, SearchFilters, SearchResponse};
pub use pagination::{PageRange, Paginator};
pub use store::{SearchState, SearchStore};
