/// Per-record decode failures. Never fatal to a batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The record carries no present entry (hidden, not stored, or an action-only record).
    #[error("record has no present entry ({0})")]
    MissingEntry(String),

    /// The entry bytes do not decode into a cart.
    #[error("malformed cart entry: {reason}")]
    Malformed { reason: String },

    /// A payload could not be encoded for the wire.
    #[error("payload encoding failed: {reason}")]
    Encode { reason: String },
}
