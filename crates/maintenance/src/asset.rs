use serde::{Deserialize, Serialize};

use transitplan_core::{AssetId, DomainResult, error::ensure_not_blank};

/// A physical asset referenced by planning calls.
///
/// Assets are not stored on their own; the analyses derived from them are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: AssetId,
    pub name: String,
    /// Free-form category tag, e.g. `bike_lane` or `traffic_signal`.
    pub category: String,
}

impl Asset {
    pub fn new(asset_id: AssetId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            asset_id,
            name: name.into(),
            category: category.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("asset.name", &self.name)?;
        ensure_not_blank("asset.category", &self.category)
    }
}
