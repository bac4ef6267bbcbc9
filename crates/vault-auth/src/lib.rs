//! # vault-auth
//!
//! Authorization for SecureVault: translating external identity-provider
//! claims into vault roles, and enforcing the operation policy table.

pub mod claims;
pub mod enforcer;
pub mod policy;

pub use claims::ClaimsMapper;
pub use enforcer::AccessController;
pub use policy::AccessPolicy;
