//! Domain types shared across SecureVault crates.

pub mod key;
pub mod operation;
pub mod principal;
pub mod record;

pub use operation::VaultOperation;
pub use principal::{Principal, Role};
pub use record::FileRecord;
