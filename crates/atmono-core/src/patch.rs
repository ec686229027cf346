//! Patch description metadata checks.
//!
//! The fetched patch export carries the runtime version that selects which
//! versioned engine script to load. Patches exported from a debug build
//! (`X.Y.Z-dev`) have no hosted runtime and abort setup.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("patch was exported with a debug runtime version `{0}`")]
    DebugVersion(String),
    #[error("patch description carries no runtime version")]
    MissingVersion,
}

/// Validate the version descriptor from `desc.meta` and hand it back for
/// building the script URL.
pub fn validate_runtime_version(version: &str) -> Result<&str, PatchError> {
    if version.is_empty() {
        return Err(PatchError::MissingVersion);
    }
    if is_debug_version(version) {
        return Err(PatchError::DebugVersion(version.to_owned()));
    }
    Ok(version)
}

/// Matches exactly `major.minor.patch-dev`.
fn is_debug_version(version: &str) -> bool {
    let Some(base) = version.strip_suffix("-dev") else {
        return false;
    };
    let parts: Vec<&str> = base.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_versions_pass() {
        assert_eq!(validate_runtime_version("1.2.3"), Ok("1.2.3"));
        assert_eq!(validate_runtime_version("1.3.0-beta.1"), Ok("1.3.0-beta.1"));
    }

    #[test]
    fn debug_versions_are_fatal() {
        assert_eq!(
            validate_runtime_version("1.2.3-dev"),
            Err(PatchError::DebugVersion("1.2.3-dev".into()))
        );
    }

    #[test]
    fn empty_version_is_missing() {
        assert_eq!(validate_runtime_version(""), Err(PatchError::MissingVersion));
    }

    #[test]
    fn dev_suffix_without_triple_is_not_debug() {
        // Only the exact X.Y.Z-dev shape marks a debug export.
        assert_eq!(validate_runtime_version("1.2-dev"), Ok("1.2-dev"));
    }
}
