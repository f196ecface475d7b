use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::hash::CellId;

/// Reference to one cart cell, as tracked by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CellReference {
    pub cell_id: CellId,
    /// Network seed the cell was cloned with. Empty when unknown.
    #[serde(default)]
    pub network_seed: String,
}

impl CellReference {
    pub fn new(cell_id: CellId, network_seed: impl Into<String>) -> Self {
        Self {
            cell_id,
            network_seed: network_seed.into(),
        }
    }

    /// A reference discovered through enumeration, where the seed is not reported.
    pub fn unseeded(cell_id: CellId) -> Self {
        Self::new(cell_id, String::new())
    }
}

impl std::fmt::Display for CellReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cell_id)
    }
}
