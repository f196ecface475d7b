//! The published reconciliation snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::cart::Cart;
use super::cell::CellReference;
use super::view::{CartView, GroupId};

/// The only shared mutable state. Always replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReconciliationState {
    /// Accepted views in registry order.
    pub views: Vec<CartView>,
    pub by_id: IndexMap<GroupId, Cart>,
    pub cells: IndexMap<GroupId, CellReference>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ReconciliationState {
    /// Build a committed snapshot from the views accepted by a pass.
    /// `by_id` and `cells` are derived from `views` only.
    pub fn from_views(views: Vec<CartView>) -> Self {
        let mut by_id = IndexMap::with_capacity(views.len());
        let mut cells = IndexMap::with_capacity(views.len());
        for view in &views {
            by_id.insert(view.group_id.clone(), view.cart.clone());
            cells.insert(view.group_id.clone(), view.cell.clone());
        }
        Self {
            views,
            by_id,
            cells,
            loading: false,
            error: None,
        }
    }

    /// Same content, marked in-flight with the prior error cleared.
    pub fn begin_loading(&self) -> Self {
        Self {
            loading: true,
            error: None,
            ..self.clone()
        }
    }

    /// Same content, with the pass failed. Views and maps are untouched.
    pub fn failed(&self, error: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(error.into()),
            ..self.clone()
        }
    }

    pub fn cart(&self, group_id: &GroupId) -> Option<&Cart> {
        self.by_id.get(group_id)
    }

    pub fn cell(&self, group_id: &GroupId) -> Option<&CellReference> {
        self.cells.get(group_id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Every key in `by_id` has exactly one view and a matching cell entry.
    pub fn is_consistent(&self) -> bool {
        if self.by_id.len() != self.views.len() || self.cells.len() != self.views.len() {
            return false;
        }
        self.views.iter().all(|v| {
            self.by_id.get(&v.group_id) == Some(&v.cart)
                && self.cells.get(&v.group_id) == Some(&v.cell)
        })
    }
}
