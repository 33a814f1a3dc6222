//! Admin secret handling.
//!
//! The configured secret is wrapped in [`SecretString`] so it never shows up
//! in `Debug` output or logs, and compared through the [`SecretVerifier`]
//! seam so callers can be tested with a fake.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A string that redacts itself in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the plaintext. Keep the result out of logs and UI.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(<redacted>)")
    }
}

/// Compares a submitted credential against the configured secret.
pub trait SecretVerifier {
    fn verify(&self, candidate: &str) -> bool;
}

/// Verifier backed by the secret resolved from configuration at startup.
///
/// An unconfigured verifier rejects every candidate.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredSecret {
    secret: Option<SecretString>,
}

impl ConfiguredSecret {
    pub fn new(secret: Option<SecretString>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_blank()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }
}

impl SecretVerifier for ConfiguredSecret {
    fn verify(&self, candidate: &str) -> bool {
        self.secret
            .as_ref()
            .is_some_and(|secret| secret.expose() == candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_candidate_verifies() {
        let verifier = ConfiguredSecret::new(Some(SecretString::new("rooted")));
        assert!(verifier.is_configured());
        assert!(verifier.verify("rooted"));
    }

    #[test]
    fn test_comparison_is_exact() {
        let verifier = ConfiguredSecret::new(Some(SecretString::new("rooted")));
        assert!(!verifier.verify("Rooted"));
        assert!(!verifier.verify("rooted "));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn test_unconfigured_fails_closed() {
        let verifier = ConfiguredSecret::new(None);
        assert!(!verifier.is_configured());
        assert!(!verifier.verify(""));
        assert!(!verifier.verify("anything"));
    }

    #[test]
    fn test_blank_secret_counts_as_unconfigured() {
        let verifier = ConfiguredSecret::new(Some(SecretString::new("   ")));
        assert!(!verifier.is_configured());
        assert!(!verifier.verify("   "));
    }

    #[test]
    fn test_debug_redacts() {
        let verifier = ConfiguredSecret::new(Some(SecretString::new("rooted")));
        let rendered = format!("{verifier:?}");
        assert!(!rendered.contains("rooted"));
        assert!(rendered.contains("redacted"));
    }
}
