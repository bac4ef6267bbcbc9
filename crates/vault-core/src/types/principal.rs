//! The authenticated caller identity passed into every vault operation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;

/// A role granted to a principal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full read/write access: upload, list, download, preview, delete.
    Admin,
    /// Read-only access: list, download, preview.
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl FromStr for Role {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            other => Err(VaultError::validation(format!("Unknown role: '{other}'"))),
        }
    }
}

/// The identity presented with each request.
///
/// Decoded by the identity provider integration outside the core and passed
/// explicitly into every [`crate::traits`] consumer — there is no ambient
/// session lookup anywhere inside the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable identifier for the caller.
    pub email: String,
    /// Roles granted to the caller. May be empty, in which case every
    /// operation is denied.
    pub roles: BTreeSet<Role>,
}

impl Principal {
    /// Creates a principal from an email and a set of roles.
    pub fn new(email: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            email: email.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns whether the principal holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether the principal holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Returns whether the principal holds no recognized role at all.
    pub fn has_no_roles(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("VIEWER".parse::<Role>().unwrap(), Role::Viewer);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn principal_role_checks() {
        let p = Principal::new("alice@example.com", [Role::Admin]);
        assert!(p.is_admin());
        assert!(!p.has_role(Role::Viewer));

        let nobody = Principal::new("ghost@example.com", []);
        assert!(nobody.has_no_roles());
        assert!(!nobody.is_admin());
    }
}
