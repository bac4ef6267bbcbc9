//! Claims-to-role mapping configuration.

use serde::{Deserialize, Serialize};

/// Authentication/authorization configuration.
///
/// The identity provider supplies opaque claim strings; which claim grants
/// which vault role is deployment policy and lives here, never in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Mapping from external claim strings to vault roles.
    #[serde(default)]
    pub role_claims: RoleClaimsConfig,
}

/// Claim strings that grant each role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleClaimsConfig {
    /// Claims that grant the Admin role.
    #[serde(default = "default_admin_claims")]
    pub admin: Vec<String>,
    /// Claims that grant the Viewer role.
    #[serde(default = "default_viewer_claims")]
    pub viewer: Vec<String>,
}

impl Default for RoleClaimsConfig {
    fn default() -> Self {
        Self {
            admin: default_admin_claims(),
            viewer: default_viewer_claims(),
        }
    }
}

fn default_admin_claims() -> Vec<String> {
    vec!["Game.Lead.Admin".to_string()]
}

fn default_viewer_claims() -> Vec<String> {
    vec!["Game.Tester.Player".to_string()]
}
