//! Advisory integrity attestation.
//!
//! A host can ask the attestor whether governed content (typically the
//! policy configuration it shipped) still matches an expected digest.
//! The result is advisory only: a mismatch warns, it never blocks, and
//! the policy guard never consults it. The expected baseline is supplied
//! explicitly by the hosting process - it is never latched implicitly
//! from the first thing the attestor sees.

use sha2::{Digest, Sha256};

/// Digests are truncated to this many hex characters.
pub const DIGEST_HEX_LEN: usize = 16;

/// Result of an attestation check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attestation {
    /// Content matches the expected digest
    Verified,
    /// Content differs from the expected digest
    Mismatch { expected: String, actual: String },
    /// No expected digest was configured; only the observed digest is reported
    Unverified { actual: String },
}

impl Attestation {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Compares content against a host-configured expected digest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegrityAttestor {
    expected: Option<String>,
}

impl IntegrityAttestor {
    /// An attestor with no baseline: every check reports `Unverified`.
    pub fn new() -> Self {
        Self::default()
    }

    /// An attestor with an explicit expected digest.
    pub fn with_expected(digest: impl Into<String>) -> Self {
        Self {
            expected: Some(digest.into()),
        }
    }

    /// Truncated SHA-256 hex digest of the content.
    pub fn digest(content: &[u8]) -> String {
        let hash = Sha256::digest(content);
        let mut hex = String::with_capacity(DIGEST_HEX_LEN);
        for byte in hash.iter().take(DIGEST_HEX_LEN / 2) {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex
    }

    /// Check the content against the configured baseline.
    pub fn attest(&self, content: &[u8]) -> Attestation {
        let actual = Self::digest(content);
        match &self.expected {
            None => Attestation::Unverified { actual },
            Some(expected) if *expected == actual => Attestation::Verified,
            Some(expected) => Attestation::Mismatch {
                expected: expected.clone(),
                actual,
            },
        }
    }
}
