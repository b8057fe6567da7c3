mod client;

pub use client::DexScreenerClient;
pub use client::PairSearchApi;
