use crate::errors::DecodeError;
use crate::models::{Cart, RawRecord};

/// Turns one stored record into a cart.
///
/// Returns a tagged result instead of failing the batch: callers skip
/// `Err` records and keep going.
pub trait IEntryDecoder: Send + Sync {
    fn decode(&self, record: &RawRecord) -> Result<Cart, DecodeError>;
}
