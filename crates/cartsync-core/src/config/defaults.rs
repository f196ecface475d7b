// Single source of truth for all default values.

use crate::constants;

// --- Remote ---
pub const DEFAULT_ENUMERATE_CLONES_FN: &str = constants::FN_ENUMERATE_CLONES;
pub const DEFAULT_READ_ALL_CARTS_FN: &str = constants::FN_READ_ALL_CARTS;
pub const DEFAULT_CLONE_CELL_FN: &str = constants::FN_CLONE_CELL;
pub const DEFAULT_CREATE_CART_ENTRY_FN: &str = constants::FN_CREATE_CART_ENTRY;

// --- Reconcile ---
pub const DEFAULT_FETCH_CONCURRENCY: usize = 1; // strictly sequential
pub const DEFAULT_DISCARD_STALE_PASSES: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
