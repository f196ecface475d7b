//! Raw binary identities as they travel on the wire.
//!
//! # Examples
//!
//! ```
//! use cartsync_core::models::{AgentKey, BackingId, CellId};
//!
//! let cell = CellId(BackingId::from(vec![1, 2, 3]), AgentKey::from(vec![9, 9]));
//! assert_eq!(cell.backing_id().as_bytes(), &[1, 2, 3]);
//! assert_eq!(cell.to_string(), "uAQID:uCQk");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::identity::encode_hash_b64;

macro_rules! byte_hash {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export)]
        pub struct $name(
            #[serde(with = "serde_bytes")]
            #[ts(type = "Uint8Array")]
            pub Vec<u8>,
        );

        impl $name {
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&encode_hash_b64(&self.0))
            }
        }
    };
}

byte_hash!(
    /// Opaque identifier of a storage cell (the DNA hash a cart cell was cloned into).
    BackingId
);

byte_hash!(
    /// Raw agent public key.
    AgentKey
);

byte_hash!(
    /// Address of the document a cart was created for.
    DocumentRef
);

/// Address of one cell: the backing id paired with the agent running it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CellId(pub BackingId, pub AgentKey);

impl CellId {
    pub fn new(backing_id: BackingId, agent: AgentKey) -> Self {
        Self(backing_id, agent)
    }

    pub fn backing_id(&self) -> &BackingId {
        &self.0
    }

    pub fn agent(&self) -> &AgentKey {
        &self.1
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}
