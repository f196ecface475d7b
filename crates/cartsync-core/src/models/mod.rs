//! Data model: carts, cells, raw wire shapes, derived views, and the published state.

pub mod cart;
pub mod cell;
pub mod hash;
pub mod pass;
pub mod role;
pub mod state;
pub mod view;
pub mod wire;

pub use cart::{Cart, CartKey, CartStatus};
pub use cell::CellReference;
pub use hash::{AgentKey, BackingId, CellId, DocumentRef};
pub use pass::PassStats;
pub use role::Role;
pub use state::ReconciliationState;
pub use view::{CartView, GroupId};
pub use wire::{
    CloneInfo, ClonedCell, CreateCartEntryInput, CreateCartInput, PresentEntry, RawRecord,
    RecordEntry,
};
