/// Remote procedure call failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The target cell could not be reached at all.
    #[error("cell {cell} unreachable: {reason}")]
    Unreachable { cell: String, reason: String },

    /// The remote side answered with an error.
    #[error("remote call {function} failed: {reason}")]
    Remote { function: String, reason: String },

    /// The call did not complete within the configured budget.
    #[error("remote call {function} timed out after {after_ms}ms")]
    Timeout { function: String, after_ms: u64 },

    /// The reply could not be parsed into the expected envelope.
    #[error("malformed reply from {function}: {reason}")]
    MalformedReply { function: String, reason: String },
}
