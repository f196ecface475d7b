//! # cartsync-core
//!
//! Foundation crate for the cart reconciliation layer.
//! Defines the cart models, wire codec, identity encoding, errors, config,
//! constants, and the traits through which remote collaborators are consumed.
//! Every other crate in the workspace depends on this.

pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod identity;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CartSyncConfig;
pub use errors::{CartError, CartResult};
pub use models::{
    AgentKey, BackingId, Cart, CartStatus, CartView, CellId, CellReference, DocumentRef, GroupId,
    ReconciliationState, Role,
};
