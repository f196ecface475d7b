//! Raw shapes exchanged with remote cells.
//!
//! Payloads and replies are MessagePack with named fields; hashes are byte
//! strings. These mirror what the backing cells produce and accept.

use serde::{Deserialize, Serialize};

use super::hash::{AgentKey, BackingId, CellId, DocumentRef};

/// One stored record as returned by a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub entry: RecordEntry,
}

impl RawRecord {
    pub fn present(entry: Vec<u8>) -> Self {
        Self {
            entry: RecordEntry::Present(PresentEntry {
                entry_type: Some("App".to_string()),
                entry,
            }),
        }
    }

    /// Entry bytes, if the record carries a present entry.
    pub fn entry_bytes(&self) -> Option<&[u8]> {
        match &self.entry {
            RecordEntry::Present(present) => Some(&present.entry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordEntry {
    Present(PresentEntry),
    Hidden,
    NotApplicable,
    NotStored,
}

impl RecordEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            RecordEntry::Present(_) => "present",
            RecordEntry::Hidden => "hidden",
            RecordEntry::NotApplicable => "not_applicable",
            RecordEntry::NotStored => "not_stored",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentEntry {
    #[serde(default)]
    pub entry_type: Option<String>,
    #[serde(with = "serde_bytes")]
    pub entry: Vec<u8>,
}

/// One row of the clone enumeration reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneInfo {
    #[serde(rename = "cart_dna_hash")]
    pub backing_id: BackingId,
    #[serde(rename = "agent_key")]
    pub agent: AgentKey,
    pub created_at: i64,
}

impl CloneInfo {
    pub fn cell_id(&self) -> CellId {
        CellId::new(self.backing_id.clone(), self.agent.clone())
    }
}

/// Reply to a clone-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClonedCell {
    pub cell_id: CellId,
    pub created_at: i64,
    #[serde(default)]
    pub network_seed: String,
}

/// Payload of a clone-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCartInput {
    pub document_hash: DocumentRef,
    pub cart_name: String,
}

/// Payload of the cart-entry creation request issued against the new cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCartEntryInput {
    pub input: CreateCartInput,
    pub created_at: i64,
}
