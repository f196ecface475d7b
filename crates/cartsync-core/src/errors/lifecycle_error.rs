/// Cart creation failures. Creation is all-or-nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifecycleError {
    #[error("clone creation failed: {reason}")]
    CloneFailed { reason: String },

    #[error("cart entry creation failed in cell {cell}: {reason}")]
    EntryCreationFailed { cell: String, reason: String },

    #[error("created cart entry could not be decoded: {reason}")]
    EntryUndecodable { reason: String },
}
