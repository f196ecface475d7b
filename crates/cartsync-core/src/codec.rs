//! MessagePack wire codec and the default entry decoder.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::DecodeError;
use crate::models::{Cart, RawRecord};
use crate::traits::IEntryDecoder;

/// MessagePack `nil`, the payload of argument-less calls.
pub fn nil_payload() -> Vec<u8> {
    vec![0xc0]
}

/// Encode a payload with named fields, as the backing cells expect.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, DecodeError> {
    rmp_serde::to_vec_named(value).map_err(|e| DecodeError::Encode {
        reason: e.to_string(),
    })
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    rmp_serde::from_slice(bytes).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })
}

/// Decodes the present entry of a record as a MessagePack-encoded [`Cart`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgpackEntryDecoder;

impl IEntryDecoder for MsgpackEntryDecoder {
    fn decode(&self, record: &RawRecord) -> Result<Cart, DecodeError> {
        let bytes = record
            .entry_bytes()
            .ok_or_else(|| DecodeError::MissingEntry(record.entry.kind().to_string()))?;
        decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentKey, BackingId, CartStatus, DocumentRef, RecordEntry};

    fn cart() -> Cart {
        Cart {
            original_backing_id: BackingId::from(vec![0; 4]),
            cart_backing_id: BackingId::from(vec![1; 4]),
            document_ref: DocumentRef::from(vec![2; 4]),
            owner: AgentKey::from(vec![3; 4]),
            status: CartStatus::Active,
            created_at: 42,
            meta: None,
        }
    }

    #[test]
    fn present_entry_decodes() {
        let record = RawRecord::present(encode(&cart()).unwrap());
        assert_eq!(MsgpackEntryDecoder.decode(&record).unwrap(), cart());
    }

    #[test]
    fn nil_payload_decodes_as_unit_and_none() {
        decode::<()>(&nil_payload()).unwrap();
        assert_eq!(decode::<Option<Vec<u8>>>(&nil_payload()).unwrap(), None);
    }

    #[test]
    fn hidden_entry_is_missing() {
        let record = RawRecord {
            entry: RecordEntry::Hidden,
        };
        assert_eq!(
            MsgpackEntryDecoder.decode(&record),
            Err(DecodeError::MissingEntry("hidden".into()))
        );
    }

    #[test]
    fn garbage_entry_is_malformed() {
        let record = RawRecord::present(vec![0xc1, 0x00, 0xff]);
        assert!(matches!(
            MsgpackEntryDecoder.decode(&record),
            Err(DecodeError::Malformed { .. })
        ));
    }
}
