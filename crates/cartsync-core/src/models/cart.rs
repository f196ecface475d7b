//! The cart entity as stored by its backing cell.
//!
//! # Examples
//!
//! ```
//! use cartsync_core::models::CartStatus;
//!
//! assert!(CartStatus::Active.can_advance_to(CartStatus::CheckedOut));
//! assert!(!CartStatus::Active.can_advance_to(CartStatus::Processed));
//! assert_eq!(CartStatus::Processed.next(), None);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::hash::{AgentKey, BackingId, DocumentRef};

/// A cart record. Created once by the backing store and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Backing id of the base cell the cart cell was cloned from.
    #[serde(rename = "original_dna_hash")]
    pub original_backing_id: BackingId,
    /// Backing id of the cell that stores this cart.
    #[serde(rename = "cart_dna_hash")]
    pub cart_backing_id: BackingId,
    #[serde(rename = "document_hash")]
    pub document_ref: DocumentRef,
    pub owner: AgentKey,
    pub status: CartStatus,
    /// Creation timestamp in microseconds since the Unix epoch.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub meta: Option<serde_json::Value>,
}

impl Cart {
    /// Identity used for deduplication across cells.
    pub fn identity_key(&self) -> CartKey {
        CartKey {
            backing_id: self.cart_backing_id.clone(),
            created_at: self.created_at,
        }
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.created_at)
    }
}

/// `(cartBackingId, createdAt)`; at most one cart per key survives a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartKey {
    pub backing_id: BackingId,
    pub created_at: i64,
}

/// Cart lifecycle status. Transitions are enforced upstream; this is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CartStatus {
    Active,
    CheckedOut,
    Processed,
}

impl CartStatus {
    /// The only status this one may move to, if any.
    pub fn next(self) -> Option<CartStatus> {
        match self {
            CartStatus::Active => Some(CartStatus::CheckedOut),
            CartStatus::CheckedOut => Some(CartStatus::Processed),
            CartStatus::Processed => None,
        }
    }

    /// Linear, no reverse transition, no skip.
    pub fn can_advance_to(self, target: CartStatus) -> bool {
        self.next() == Some(target)
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CartStatus::Active => "Active",
            CartStatus::CheckedOut => "CheckedOut",
            CartStatus::Processed => "Processed",
        };
        f.write_str(s)
    }
}
