//! # cartsync-reconcile
//!
//! Client-side reconciliation of carts stored one-per-cell.
//! Discovers cart cells, fetches and decodes their records, deduplicates
//! carts seen through more than one cell, filters them by viewer role, and
//! publishes one consistent snapshot to subscribers.
//!
//! ## Modules
//!
//! - [`registry`]: Known cart cells, keyed by group id, plus clone enumeration
//! - [`fetcher`]: One "read all carts" call per cell, per-record decoding
//! - [`visibility`]: Scanner/owner visibility policy
//! - [`reconcile`]: The reconciliation pass: fan-out, dedup, filter, commit
//! - [`lifecycle`]: All-or-nothing cart creation
//! - [`publish`]: Snapshot ownership, subscribers, and the generation guard
//! - [`store`]: `CartStore`, the published facade

pub mod fetcher;
pub mod lifecycle;
pub mod publish;
pub mod reconcile;
pub mod registry;
pub mod store;
pub mod visibility;

pub use fetcher::{CartFetcher, FetchReport};
pub use lifecycle::{CartLifecycle, CreatedCart};
pub use publish::{StatePublisher, SubscriptionId};
pub use reconcile::{PassOutcome, PassReport, ReconciliationLoop};
pub use registry::{CellRegistry, IdentityHint};
pub use store::CartStore;
pub use visibility::VisibilityFilter;
