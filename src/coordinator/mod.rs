mod fetcher;

pub use fetcher::CoordinatorConfig;
pub use fetcher::FetchOutcome;
pub use fetcher::RetryConfig;
pub use fetcher::SearchCoordinator;
