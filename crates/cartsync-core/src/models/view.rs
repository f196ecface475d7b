//! Derived per-pass views.
//!
//! # Examples
//!
//! ```
//! use cartsync_core::identity::HashB64Encoder;
//! use cartsync_core::models::{BackingId, GroupId};
//!
//! let id = GroupId::derive(&HashB64Encoder, &BackingId::from(vec![1, 2, 3]), 100);
//! assert_eq!(id.as_str(), "cart_uAQID_100");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::GROUP_ID_PREFIX;
use crate::traits::IIdentityEncoder;

use super::cart::Cart;
use super::cell::CellReference;
use super::hash::BackingId;

/// `"cart_" + encode(backingId) + "_" + createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn derive(encoder: &dyn IIdentityEncoder, backing_id: &BackingId, created_at: i64) -> Self {
        Self(format!(
            "{GROUP_ID_PREFIX}{}_{created_at}",
            encoder.encode(backing_id.as_bytes())
        ))
    }

    pub fn for_cart(encoder: &dyn IIdentityEncoder, cart: &Cart) -> Self {
        Self::derive(encoder, &cart.cart_backing_id, cart.created_at)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One accepted cart plus the cell it was fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    pub group_id: GroupId,
    /// Display title for list rendering.
    pub title: String,
    pub cart: Cart,
    pub cell: CellReference,
}

impl CartView {
    pub fn new(encoder: &dyn IIdentityEncoder, cart: Cart, cell: CellReference) -> Self {
        Self {
            group_id: GroupId::for_cart(encoder, &cart),
            title: format!("Cart {}", cart.created_at),
            cart,
            cell,
        }
    }
}
