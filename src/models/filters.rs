use serde::{Deserialize, Serialize};

/// Optional constraints attached to a search
///
/// Stored alongside the query but not applied to the result list yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub min_liquidity: Option<f64>,
    pub min_volume: Option<f64>,
    pub chain_id: Option<String>,
}

impl SearchFilters {
    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.min_liquidity.is_none() && self.min_volume.is_none() && self.chain_id.is_none()
    }
}
