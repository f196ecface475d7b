use serde::{Deserialize, Serialize};

use crate::constants::SCANNER_ROLE;

/// Viewer role. Scanners see every cart; every other role sees only its own.
///
/// # Examples
///
/// ```
/// use cartsync_core::models::Role;
///
/// assert_eq!(Role::parse("scanner"), Role::Scanner);
/// assert_eq!(Role::parse("customer"), Role::Owner("customer".into()));
/// assert!(!Role::parse("Scanner").is_scanner());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Scanner,
    Owner(String),
}

impl Role {
    pub fn parse(s: &str) -> Self {
        if s == SCANNER_ROLE {
            Role::Scanner
        } else {
            Role::Owner(s.to_string())
        }
    }

    pub fn is_scanner(&self) -> bool {
        matches!(self, Role::Scanner)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Scanner => SCANNER_ROLE,
            Role::Owner(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
