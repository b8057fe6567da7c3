mod search_store;

pub use search_store::SearchState;
pub use search_store::SearchStore;
