//! Golden reconciliation scenarios.
//!
//! Every hash is written as a label; see [`crate::builders`]. A scenario
//! lists the registry in order, what each cell answers, and the views and
//! counters a pass must produce.

use serde::Deserialize;

use cartsync_core::constants::FN_READ_ALL_CARTS;
use cartsync_core::models::{Cart, CellId, CellReference, CloneInfo, Role};

use crate::builders;
use crate::transport::{Reply, ScriptedTransport};

#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileScenario {
    pub description: String,
    pub role: String,
    /// Agent label of the local client.
    pub self_agent: String,
    pub registry: Vec<RegistryEntry>,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    pub backing: String,
    pub agent: String,
    pub created_at: i64,
    pub reply: CellScript,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CellScript {
    pub carts: Vec<CartSpec>,
    /// Present records whose entry is not a cart, appended after `carts`.
    pub garbage_records: usize,
    /// When set, the cell's call fails with this reason.
    pub fail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartSpec {
    pub backing: String,
    pub created_at: i64,
    pub owner: String,
}

impl CartSpec {
    pub fn build(&self) -> Cart {
        builders::cart(&self.backing, self.created_at, &self.owner)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedOutcome {
    pub views: Vec<ExpectedView>,
    pub cells_failed: usize,
    pub records_skipped: usize,
    pub duplicates_discarded: usize,
    pub hidden: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedView {
    pub group_id: String,
    /// Backing label of the cell the winning copy was fetched from.
    pub from_cell: String,
    pub owner: String,
}

impl RegistryEntry {
    pub fn cell_id(&self) -> CellId {
        builders::cell_id(&self.backing, &self.agent)
    }

    pub fn cell(&self) -> CellReference {
        CellReference::unseeded(self.cell_id())
    }

    pub fn clone_info(&self) -> CloneInfo {
        builders::clone_info(&self.backing, &self.agent, self.created_at)
    }
}

impl ReconcileScenario {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    pub fn self_identity(&self) -> String {
        builders::identity_of(&self.self_agent)
    }

    /// Enumeration rows in registry order.
    pub fn clone_infos(&self) -> Vec<CloneInfo> {
        self.registry.iter().map(RegistryEntry::clone_info).collect()
    }

    /// A transport answering enumeration and every cell as scripted.
    pub fn transport(&self) -> ScriptedTransport {
        let transport = ScriptedTransport::new();
        transport.clones(&self.clone_infos());
        for entry in &self.registry {
            let cell = entry.cell_id();
            match &entry.reply.fail {
                Some(reason) => {
                    transport.fail_cell(&cell, reason);
                }
                None => {
                    let mut records: Vec<_> = entry
                        .reply
                        .carts
                        .iter()
                        .map(|spec| builders::record(&spec.build()))
                        .collect();
                    records.extend(
                        (0..entry.reply.garbage_records).map(|_| builders::garbage_record()),
                    );
                    transport.on_cell(&cell, FN_READ_ALL_CARTS, Reply::records(&records));
                }
            }
        }
        transport
    }
}
