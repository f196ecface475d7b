// Identifiers and wire names shared across the workspace.

/// Prefix of every derived cart group id.
pub const GROUP_ID_PREFIX: &str = "cart_";

/// Multibase prefix for URL-safe unpadded base64 hash strings.
pub const HASH_B64_PREFIX: char = 'u';

/// Role string that grants omniscient visibility.
pub const SCANNER_ROLE: &str = "scanner";

// --- Remote function names ---
pub const FN_ENUMERATE_CLONES: &str = "get_cart_clones";
pub const FN_READ_ALL_CARTS: &str = "get_all_carts";
pub const FN_CLONE_CELL: &str = "clone_cart_dna";
pub const FN_CREATE_CART_ENTRY: &str = "create_cart_entry";

/// Environment variable consulted by the tracing subscriber.
pub const LOG_ENV_VAR: &str = "CARTSYNC_LOG";
