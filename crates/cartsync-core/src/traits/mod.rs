//! Seams through which the reconciliation layer consumes its collaborators.

mod decoder;
mod identity;
mod transport;

pub use decoder::IEntryDecoder;
pub use identity::IIdentityEncoder;
pub use transport::{CallTarget, ICellTransport};
