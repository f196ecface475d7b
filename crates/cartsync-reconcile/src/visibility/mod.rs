//! Role-dependent visibility policy.

use cartsync_core::models::{Cart, Role};
use cartsync_core::traits::IIdentityEncoder;

/// Pure visibility decision: scanners see everything, every other role only
/// sees carts whose encoded owner equals `self_identity`.
pub fn is_visible(
    cart: &Cart,
    role: &Role,
    self_identity: &str,
    encoder: &dyn IIdentityEncoder,
) -> bool {
    match role {
        Role::Scanner => true,
        Role::Owner(_) => encoder.encode(cart.owner.as_bytes()) == self_identity,
    }
}

/// [`is_visible`] bound to one role and identity for the length of a pass.
#[derive(Clone, Copy)]
pub struct VisibilityFilter<'a> {
    role: &'a Role,
    self_identity: &'a str,
    encoder: &'a dyn IIdentityEncoder,
}

impl<'a> VisibilityFilter<'a> {
    pub fn new(role: &'a Role, self_identity: &'a str, encoder: &'a dyn IIdentityEncoder) -> Self {
        Self {
            role,
            self_identity,
            encoder,
        }
    }

    pub fn is_visible(&self, cart: &Cart) -> bool {
        is_visible(cart, self.role, self.self_identity, self.encoder)
    }

    pub fn role(&self) -> &Role {
        self.role
    }
}
