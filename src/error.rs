use thiserror::Error;

/// Reasons a query is rejected before any request is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("search query is required")]
    Required,
    #[error("search query must be at least {min} characters")]
    TooShort { min: usize },
}

/// Errors produced while searching for pairs
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-success HTTP status from the search endpoint
    #[error("Failed to fetch pairs: {status_text}")]
    Http { status: u16, status_text: String },

    /// The request itself failed (DNS, connect, TLS, timeout...)
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode search response: {0}")]
    Decode(String),

    /// The configured base URL cannot form a request URL
    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),
}
