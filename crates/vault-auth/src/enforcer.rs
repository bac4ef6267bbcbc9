//! Access enforcement: (principal roles, operation) → allow/deny.

use tracing::debug;

use vault_core::error::VaultError;
use vault_core::result::VaultResult;
use vault_core::types::{Principal, VaultOperation};

use crate::policy::AccessPolicy;

/// Pure policy gate consulted before every vault operation.
#[derive(Debug, Clone, Default)]
pub struct AccessController {
    /// The policy table.
    policy: AccessPolicy,
}

impl AccessController {
    /// Creates a controller with the default policy table.
    pub fn new() -> Self {
        Self {
            policy: AccessPolicy::new(),
        }
    }

    /// Creates a controller with a custom policy table.
    pub fn with_policy(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Checks whether the principal may perform the operation.
    ///
    /// A principal with no recognized role is fully denied; that is an
    /// authentication/provisioning gap, distinct from an explicit Viewer
    /// grant being insufficient.
    pub fn authorize(
        &self,
        principal: &Principal,
        operation: VaultOperation,
    ) -> VaultResult<()> {
        if principal.has_no_roles() {
            debug!(email = %principal.email, %operation, "Denied: no recognized role");
            return Err(VaultError::authorization(
                "No recognized role; access denied",
            ));
        }

        if principal
            .roles
            .iter()
            .any(|role| self.policy.allows(*role, operation))
        {
            return Ok(());
        }

        debug!(email = %principal.email, %operation, "Denied: role insufficient");
        Err(VaultError::authorization(format!(
            "Role does not permit operation '{operation}'"
        )))
    }
}
