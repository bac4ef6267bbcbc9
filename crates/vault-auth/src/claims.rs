//! Claims-to-role resolution.
//!
//! The identity provider hands over an email and a bag of opaque claim
//! strings. Which claim grants which role is deployment configuration
//! ([`RoleClaimsConfig`]); nothing in here branches on a literal identity.

use std::collections::HashSet;

use vault_core::config::auth::RoleClaimsConfig;
use vault_core::types::{Principal, Role};

/// Maps external claim strings to vault roles.
#[derive(Debug, Clone)]
pub struct ClaimsMapper {
    /// Claims granting Admin.
    admin_claims: HashSet<String>,
    /// Claims granting Viewer.
    viewer_claims: HashSet<String>,
}

impl ClaimsMapper {
    /// Build a mapper from the configured claim lists.
    pub fn new(config: &RoleClaimsConfig) -> Self {
        Self {
            admin_claims: config.admin.iter().cloned().collect(),
            viewer_claims: config.viewer.iter().cloned().collect(),
        }
    }

    /// Resolve a decoded identity into a [`Principal`].
    ///
    /// Unrecognized claims are ignored. A caller whose claims match nothing
    /// gets an empty role set, which the access controller denies outright —
    /// absence of any role claim is an authentication gap, not an implicit
    /// Viewer grant.
    pub fn resolve(&self, email: impl Into<String>, claims: &[String]) -> Principal {
        let mut roles = Vec::new();
        for claim in claims {
            if self.admin_claims.contains(claim) {
                roles.push(Role::Admin);
            }
            if self.viewer_claims.contains(claim) {
                roles.push(Role::Viewer);
            }
        }
        Principal::new(email, roles)
    }
}
