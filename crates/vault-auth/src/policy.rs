//! Role-to-operation policy definitions.

use std::collections::{HashMap, HashSet};

use vault_core::types::{Role, VaultOperation};

/// Defines which roles may perform each vault operation.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Operation → set of roles allowed to perform it.
    allowed: HashMap<VaultOperation, HashSet<Role>>,
}

impl AccessPolicy {
    /// Creates the default policy table: mutation is Admin-only, reads are
    /// open to both roles.
    pub fn new() -> Self {
        let mut allowed = HashMap::new();

        allowed.insert(VaultOperation::Upload, HashSet::from([Role::Admin]));
        allowed.insert(VaultOperation::Delete, HashSet::from([Role::Admin]));
        allowed.insert(
            VaultOperation::List,
            HashSet::from([Role::Admin, Role::Viewer]),
        );
        allowed.insert(
            VaultOperation::Download,
            HashSet::from([Role::Admin, Role::Viewer]),
        );
        allowed.insert(
            VaultOperation::Preview,
            HashSet::from([Role::Admin, Role::Viewer]),
        );

        Self { allowed }
    }

    /// Whether the given role may perform the operation.
    pub fn allows(&self, role: Role, operation: VaultOperation) -> bool {
        self.allowed
            .get(&operation)
            .is_some_and(|roles| roles.contains(&role))
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table_matches_contract() {
        let policy = AccessPolicy::new();

        assert!(policy.allows(Role::Admin, VaultOperation::Upload));
        assert!(policy.allows(Role::Admin, VaultOperation::Delete));
        assert!(!policy.allows(Role::Viewer, VaultOperation::Upload));
        assert!(!policy.allows(Role::Viewer, VaultOperation::Delete));

        for op in [
            VaultOperation::List,
            VaultOperation::Download,
            VaultOperation::Preview,
        ] {
            assert!(policy.allows(Role::Admin, op));
            assert!(policy.allows(Role::Viewer, op));
        }
    }
}
