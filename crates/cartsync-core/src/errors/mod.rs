//! Error taxonomy for the reconciliation layer.
//!
//! Failures local to one cell ([`TransportError`], [`DecodeError`]) are
//! absorbed by the reconciliation loop. Failures that prevent determining the
//! set of cells, or that abort cart creation, surface through [`CartError`].

mod decode_error;
mod lifecycle_error;
mod transport_error;

pub use decode_error::DecodeError;
pub use lifecycle_error::LifecycleError;
pub use transport_error::TransportError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The set of known cells could not be determined.
    #[error("cell registry unavailable: {reason}")]
    RegistryUnavailable { reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

pub type CartResult<T> = Result<T, CartError>;

impl CartError {
    /// Whether this error only concerns a single cell and must not abort a pass.
    pub fn is_cell_local(&self) -> bool {
        matches!(self, CartError::Transport(_) | CartError::Decode(_))
    }
}
