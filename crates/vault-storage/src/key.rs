//! Storage-key generation.
//!
//! Keys are human-traceable (`<owner>_<timestamp>_<suffix>_<name>`) but
//! treated as opaque tokens everywhere downstream. A principal prefix plus a
//! second-resolution timestamp is not unique under concurrent uploads, so
//! every key carries a random disambiguator and is checked against the blob
//! store before being handed out.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::debug;

use vault_core::error::VaultError;
use vault_core::result::VaultResult;
use vault_core::traits::blob::BlobStore;
use vault_core::types::key::sanitize_filename;

/// Length of the random disambiguation suffix.
const SUFFIX_LEN: usize = 4;

/// Derives collision-resistant, traversal-safe storage keys.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    /// Maximum attempts before giving up with a storage error.
    max_attempts: u32,
}

impl KeyGenerator {
    /// Creates a generator with the given retry cap.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Generate a storage key for an upload.
    ///
    /// The key is `<email local part>_<UTC timestamp, microseconds>_<random
    /// suffix>_<sanitized filename>`. Generation re-rolls until the blob
    /// store reports the key unused; the bounded retry is a correctness
    /// requirement, not an optimization, because two uploads can land in the
    /// same timestamp tick.
    pub async fn generate(
        &self,
        blob: &dyn BlobStore,
        owner_email: &str,
        original_filename: &str,
    ) -> VaultResult<String> {
        let name = sanitize_filename(original_filename);
        if name.is_empty() {
            return Err(VaultError::validation(format!(
                "Filename has no usable characters: '{original_filename}'"
            )));
        }
        let prefix = owner_prefix(owner_email);

        for attempt in 0..self.max_attempts {
            let timestamp = Utc::now().format("%Y%m%d%H%M%S%6f");
            let suffix: String = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(SUFFIX_LEN)
                .map(char::from)
                .collect();
            let key = format!("{prefix}_{timestamp}_{suffix}_{name}");

            if !blob.exists(&key).await? {
                return Ok(key);
            }
            debug!(key, attempt, "Storage key collision, retrying");
        }

        Err(VaultError::storage(format!(
            "Could not find an unused storage key after {} attempts",
            self.max_attempts
        )))
    }
}

/// Sanitized local part of the owner's email, for a human-traceable prefix.
fn owner_prefix(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    let cleaned = sanitize_filename(local);
    if cleaned.is_empty() {
        "user".to_string()
    } else {
        cleaned
    }
}
