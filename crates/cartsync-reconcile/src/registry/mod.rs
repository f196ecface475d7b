//! Known cart cells, keyed by derived group id, in insertion order.

mod enumerate;

pub use enumerate::enumerate_clones;

use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexMap;

use cartsync_core::errors::{CartError, CartResult};
use cartsync_core::models::{BackingId, CellReference, CloneInfo, GroupId};
use cartsync_core::traits::IIdentityEncoder;
use cartsync_observability::events;

/// What the registry needs to derive a group id for a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHint {
    pub backing_id: BackingId,
    pub created_at: i64,
}

impl IdentityHint {
    pub fn new(backing_id: BackingId, created_at: i64) -> Self {
        Self {
            backing_id,
            created_at,
        }
    }
}

#[derive(Default)]
struct Cells {
    entries: IndexMap<GroupId, CellReference>,
    /// Newest pass generation that read or replaced the set.
    generation: u64,
}

/// Holds the set of known cart cell references.
///
/// Entries are only ever dropped by [`CellRegistry::replace_all`].
pub struct CellRegistry {
    cells: Mutex<Cells>,
    encoder: Arc<dyn IIdentityEncoder>,
}

impl CellRegistry {
    pub fn new(encoder: Arc<dyn IIdentityEncoder>) -> Self {
        Self {
            cells: Mutex::new(Cells::default()),
            encoder,
        }
    }

    /// Register a cell under the group id derived from `hint`.
    /// Re-registering an existing group id replaces its reference in place.
    pub fn register(&self, cell: CellReference, hint: &IdentityHint) -> CartResult<GroupId> {
        let group_id = GroupId::derive(self.encoder.as_ref(), &hint.backing_id, hint.created_at);
        let cell_str = cell.to_string();
        let replaced = self.lock()?.entries.insert(group_id.clone(), cell).is_some();
        events::cell_registered(group_id.as_str(), &cell_str, replaced);
        Ok(group_id)
    }

    /// Snapshot of every entry in registry order.
    pub fn list(&self) -> CartResult<Vec<(GroupId, CellReference)>> {
        Ok(snapshot(&self.lock()?.entries))
    }

    /// [`list`](Self::list) on behalf of pass `generation`. Once a pass has
    /// read the set, no older pass may replace it.
    pub fn list_for_pass(&self, generation: u64) -> CartResult<Vec<(GroupId, CellReference)>> {
        let mut cells = self.lock()?;
        cells.generation = cells.generation.max(generation);
        Ok(snapshot(&cells.entries))
    }

    /// Replace the whole set with an authoritative one. Later duplicates of a
    /// group id overwrite earlier ones but keep the first position.
    pub fn replace_all(
        &self,
        entries: impl IntoIterator<Item = (GroupId, CellReference)>,
    ) -> CartResult<()> {
        let next: IndexMap<GroupId, CellReference> = entries.into_iter().collect();
        let mut cells = self.lock()?;
        events::registry_replaced(cells.entries.len(), next.len());
        cells.entries = next;
        Ok(())
    }

    /// Replace the whole set from enumeration rows. Enumeration does not
    /// report network seeds, so every reference is unseeded.
    pub fn replace_all_from_clones(&self, infos: &[CloneInfo]) -> CartResult<usize> {
        self.replace_all(self.entries_from_clones(infos))?;
        self.len()
    }

    /// [`replace_all_from_clones`](Self::replace_all_from_clones) on behalf
    /// of pass `generation`. Returns `None`, leaving the set untouched, when
    /// a newer pass has already read or replaced it.
    pub fn replace_for_pass(
        &self,
        generation: u64,
        infos: &[CloneInfo],
    ) -> CartResult<Option<usize>> {
        let next: IndexMap<GroupId, CellReference> =
            self.entries_from_clones(infos).into_iter().collect();
        let mut cells = self.lock()?;
        if cells.generation > generation {
            return Ok(None);
        }
        events::registry_replaced(cells.entries.len(), next.len());
        cells.generation = generation;
        cells.entries = next;
        Ok(Some(cells.entries.len()))
    }

    /// Newest generation that read or replaced the set.
    pub fn generation(&self) -> CartResult<u64> {
        Ok(self.lock()?.generation)
    }

    fn entries_from_clones(&self, infos: &[CloneInfo]) -> Vec<(GroupId, CellReference)> {
        infos
            .iter()
            .map(|info| {
                (
                    GroupId::derive(self.encoder.as_ref(), &info.backing_id, info.created_at),
                    CellReference::unseeded(info.cell_id()),
                )
            })
            .collect()
    }

    pub fn get(&self, group_id: &GroupId) -> CartResult<Option<CellReference>> {
        Ok(self.lock()?.entries.get(group_id).cloned())
    }

    /// Whether any entry points at `cell`.
    pub fn contains_cell(&self, cell: &CellReference) -> CartResult<bool> {
        Ok(self.lock()?.entries.values().any(|c| c == cell))
    }

    pub fn len(&self) -> CartResult<usize> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> CartResult<bool> {
        Ok(self.lock()?.entries.is_empty())
    }

    fn lock(&self) -> CartResult<MutexGuard<'_, Cells>> {
        self.cells.lock().map_err(|e| CartError::RegistryUnavailable {
            reason: format!("registry lock: {e}"),
        })
    }
}

fn snapshot(entries: &IndexMap<GroupId, CellReference>) -> Vec<(GroupId, CellReference)> {
    entries
        .iter()
        .map(|(id, cell)| (id.clone(), cell.clone()))
        .collect()
}
