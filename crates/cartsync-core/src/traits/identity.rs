/// Deterministic, collision-free mapping from a raw binary identity to a stable string.
///
/// Used to build group ids and to compare cart owners with the local identity.
pub trait IIdentityEncoder: Send + Sync {
    fn encode(&self, raw: &[u8]) -> String;
}
