//! Clone enumeration: the authoritative list of cart cells.

use cartsync_core::codec;
use cartsync_core::errors::{CartError, CartResult};
use cartsync_core::models::CloneInfo;
use cartsync_core::traits::{CallTarget, ICellTransport};

/// Ask the base cell for every known cart cell.
///
/// Any failure here means the set of cells cannot be determined, so it is
/// reported as [`CartError::RegistryUnavailable`].
pub async fn enumerate_clones<T: ICellTransport>(
    transport: &T,
    function: &str,
) -> CartResult<Vec<CloneInfo>> {
    let reply = transport
        .invoke(&CallTarget::Base, function, codec::nil_payload())
        .await
        .map_err(|e| CartError::RegistryUnavailable {
            reason: e.to_string(),
        })?;
    codec::decode::<Option<Vec<CloneInfo>>>(&reply)
        .map(Option::unwrap_or_default)
        .map_err(|e| CartError::RegistryUnavailable {
            reason: format!("{function}: {e}"),
        })
}
