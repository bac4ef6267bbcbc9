//! Storage-key and filename hygiene.
//!
//! Storage keys are opaque tokens confined to a store's root directory.
//! Sanitation lives here, in the core, so the blob and metadata stores
//! enforce the exact same invariant.

use crate::error::VaultError;
use crate::result::VaultResult;

/// Reduce a user-supplied filename to a safe display/key component.
///
/// Drops any directory components, strips control characters, and collapses
/// everything outside `[A-Za-z0-9._-]` to `_`. Runs of dots collapse to a
/// single dot and leading dots are removed, so a name can never form a
/// hidden, relative, or `..` path component — the output always satisfies
/// [`validate_key`]'s character rules. Returns an empty string for names
/// with no salvageable characters; callers treat that as a validation
/// failure.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars().filter(|c| !c.is_control()) {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            c
        } else {
            '_'
        };
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }
    cleaned.trim_start_matches('.').to_string()
}

/// Lowercased extension of a filename, if it has a non-empty one.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Assert that a storage key is a well-formed opaque token.
///
/// Keys are produced exclusively by the key generator, so a key containing
/// a path separator, a `..` segment, or control characters is an internal
/// invariant violation, not a normal input error.
pub fn validate_key(key: &str) -> VaultResult<()> {
    if key.is_empty() {
        return Err(VaultError::internal("Empty storage key"));
    }
    if key.contains(['/', '\\']) || key.contains("..") {
        return Err(VaultError::internal(format!(
            "Storage key contains path segments: '{key}'"
        )));
    }
    if key.chars().any(char::is_control) {
        return Err(VaultError::internal(
            "Storage key contains control characters",
        ));
    }
    Ok(())
}
