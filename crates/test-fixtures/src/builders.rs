//! Label-based builders. A label's UTF-8 bytes are used as the raw hash, so
//! `backing("A")` and `agent("A")` are distinct types over the same bytes.

use cartsync_core::codec;
use cartsync_core::identity::encode_hash_b64;
use cartsync_core::models::{
    AgentKey, BackingId, Cart, CartStatus, CellId, CellReference, CloneInfo, ClonedCell,
    DocumentRef, RawRecord,
};

/// Backing id of the base cell every cart cell is cloned from.
pub const BASE_LABEL: &str = "base";

pub fn backing(label: &str) -> BackingId {
    BackingId::from(label.as_bytes())
}

pub fn agent(label: &str) -> AgentKey {
    AgentKey::from(label.as_bytes())
}

pub fn document(label: &str) -> DocumentRef {
    DocumentRef::from(label.as_bytes())
}

/// The self identity string a client running as `agent_label` would hold.
pub fn identity_of(agent_label: &str) -> String {
    encode_hash_b64(agent_label.as_bytes())
}

pub fn cell_id(backing_label: &str, agent_label: &str) -> CellId {
    CellId::new(backing(backing_label), agent(agent_label))
}

pub fn cell(backing_label: &str, agent_label: &str) -> CellReference {
    CellReference::unseeded(cell_id(backing_label, agent_label))
}

pub fn cart(backing_label: &str, created_at: i64, owner: &str) -> Cart {
    Cart {
        original_backing_id: backing(BASE_LABEL),
        cart_backing_id: backing(backing_label),
        document_ref: document("doc"),
        owner: agent(owner),
        status: CartStatus::Active,
        created_at,
        meta: None,
    }
}

pub fn clone_info(backing_label: &str, agent_label: &str, created_at: i64) -> CloneInfo {
    CloneInfo {
        backing_id: backing(backing_label),
        agent: agent(agent_label),
        created_at,
    }
}

pub fn cloned_cell(backing_label: &str, agent_label: &str, created_at: i64, seed: &str) -> ClonedCell {
    ClonedCell {
        cell_id: cell_id(backing_label, agent_label),
        created_at,
        network_seed: seed.to_string(),
    }
}

/// A stored record carrying `cart` as its present entry.
pub fn record(cart: &Cart) -> RawRecord {
    RawRecord::present(codec::encode(cart).expect("cart encodes"))
}

/// A present record whose entry bytes are not a cart.
pub fn garbage_record() -> RawRecord {
    RawRecord::present(vec![0xc1, 0xff, 0x00])
}
