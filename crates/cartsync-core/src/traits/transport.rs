//! ICellTransport: the remote procedure interface.

use crate::errors::TransportError;
use crate::models::CellId;

/// Which cell a remote call is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// The base (uncloned) cell. Enumeration and clone creation go here.
    Base,
    /// A specific cart cell.
    Cell(CellId),
}

impl std::fmt::Display for CallTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallTarget::Base => f.write_str("base"),
            CallTarget::Cell(id) => write!(f, "{id}"),
        }
    }
}

/// Invokes a named function on a cell with a MessagePack payload and returns
/// the raw MessagePack reply.
///
/// Implementations own connection management, signing, and retries. The
/// reconciliation layer only distinguishes success from [`TransportError`].
#[allow(async_fn_in_trait)]
pub trait ICellTransport {
    async fn invoke(
        &self,
        target: &CallTarget,
        function: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError>;
}
