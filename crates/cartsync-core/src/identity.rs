//! Default identity encoding: `u` + URL-safe unpadded base64.
//!
//! # Examples
//!
//! ```
//! use cartsync_core::identity::{decode_hash_b64, encode_hash_b64};
//!
//! let s = encode_hash_b64(&[0xfb, 0xff]);
//! assert_eq!(s, "u-_8");
//! assert_eq!(decode_hash_b64(&s), Some(vec![0xfb, 0xff]));
//! assert_eq!(decode_hash_b64("-_8"), None);
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::constants::HASH_B64_PREFIX;
use crate::traits::IIdentityEncoder;

pub fn encode_hash_b64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(1 + bytes.len().div_ceil(3) * 4);
    out.push(HASH_B64_PREFIX);
    URL_SAFE_NO_PAD.encode_string(bytes, &mut out);
    out
}

pub fn decode_hash_b64(s: &str) -> Option<Vec<u8>> {
    let body = s.strip_prefix(HASH_B64_PREFIX)?;
    URL_SAFE_NO_PAD.decode(body).ok()
}

/// Stateless [`IIdentityEncoder`] producing multibase `u`-prefixed strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashB64Encoder;

impl IIdentityEncoder for HashB64Encoder {
    fn encode(&self, raw: &[u8]) -> String {
        encode_hash_b64(raw)
    }
}
