use serde::{Deserialize, Serialize};

use super::defaults;

/// Names of the remote functions invoked on cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base-cell call listing every known cart cell.
    pub enumerate_clones: String,
    /// Per-cell call returning every cart record in that cell.
    pub read_all_carts: String,
    /// Base-cell call provisioning a new cart cell.
    pub clone_cell: String,
    /// Per-cell call writing the first cart entry into a new cell.
    pub create_cart_entry: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enumerate_clones: defaults::DEFAULT_ENUMERATE_CLONES_FN.to_string(),
            read_all_carts: defaults::DEFAULT_READ_ALL_CARTS_FN.to_string(),
            clone_cell: defaults::DEFAULT_CLONE_CELL_FN.to_string(),
            create_cart_entry: defaults::DEFAULT_CREATE_CART_ENTRY_FN.to_string(),
        }
    }
}
