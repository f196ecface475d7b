//! First-seen deduplication by cart identity, followed by visibility filtering.

use std::collections::HashSet;

use cartsync_core::models::{Cart, CartKey, CartView, CellReference};
use cartsync_core::traits::IIdentityEncoder;

use crate::visibility::VisibilityFilter;

/// What happened to a cart offered to the [`Deduplicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Identity key already seen earlier in the pass.
    Duplicate,
    /// First sighting, but not visible to the current role.
    Hidden,
}

/// Accumulates the views of one pass.
///
/// A key is marked seen before the visibility check, so a hidden cart still
/// shadows later copies of itself.
pub struct Deduplicator<'a> {
    filter: VisibilityFilter<'a>,
    encoder: &'a dyn IIdentityEncoder,
    seen: HashSet<CartKey>,
    views: Vec<CartView>,
    duplicates: usize,
    hidden: usize,
}

impl<'a> Deduplicator<'a> {
    pub fn new(filter: VisibilityFilter<'a>, encoder: &'a dyn IIdentityEncoder) -> Self {
        Self {
            filter,
            encoder,
            seen: HashSet::new(),
            views: Vec::new(),
            duplicates: 0,
            hidden: 0,
        }
    }

    pub fn offer(&mut self, cart: Cart, cell: &CellReference) -> Admission {
        if !self.seen.insert(cart.identity_key()) {
            self.duplicates += 1;
            return Admission::Duplicate;
        }
        if !self.filter.is_visible(&cart) {
            self.hidden += 1;
            return Admission::Hidden;
        }
        self.views
            .push(CartView::new(self.encoder, cart, cell.clone()));
        Admission::Accepted
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn into_views(self) -> Vec<CartView> {
        self.views
    }
}
