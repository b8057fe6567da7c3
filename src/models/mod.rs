pub mod pair;
mod filters;
mod token;

pub use pair::PairRecord;
pub use pair::SearchResponse;
pub use pair::TokenInfo;
pub use filters::SearchFilters;
pub use token::PairToken;
pub use token::NOT_AVAILABLE;

#[cfg(test)]
pub(crate) use token::test_record;
