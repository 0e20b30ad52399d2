//! SSH public key records
//!
//! NIST 800-53: IA-2 (Identification and Authentication)
//! Implementation: Syntactic handling of authorized-key lines. No base64 or
//! algorithm validation happens here; the SSH transport library owns the
//! cryptographic use of the key material.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One registered SSH public key: algorithm identifier plus base64 key
/// material. Equality is exact equality of both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SshPublicKey {
    /// Algorithm identifier, e.g. `ssh-ed25519`
    pub algorithm: String,
    /// Base64 key material, uninterpreted
    pub key_material: String,
}

impl SshPublicKey {
    /// Create a key record from already-split fields
    pub fn new(algorithm: impl Into<String>, key_material: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            key_material: key_material.into(),
        }
    }

    /// Parse one authorized-key line of the form
    /// `<algorithm> <base64-key-material>[ <comment...>]`.
    ///
    /// The trailing comment, if present, is discarded. Returns `None` when
    /// fewer than two whitespace-separated fields are present.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let algorithm = parts.next()?;
        let key_material = parts.next()?;
        Some(Self::new(algorithm, key_material))
    }
}

/// Parse a batch of authorized-key lines, skipping unparseable ones.
///
/// Invalid lines are logged and dropped rather than failing the whole
/// load, so one bad key in a user's configuration does not lock the user
/// out of the remaining keys.
pub fn parse_lines(lines: &[String]) -> Vec<SshPublicKey> {
    lines
        .iter()
        .filter_map(|line| match SshPublicKey::parse(line) {
            Some(key) => Some(key),
            None => {
                warn!(key_line = %line, "Skipping malformed SSH public key line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_fields() {
        let key = SshPublicKey::parse("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMq").unwrap();
        assert_eq!(key.algorithm, "ssh-ed25519");
        assert_eq!(key.key_material, "AAAAC3NzaC1lZDI1NTE5AAAAIOMq");
    }

    #[test]
    fn test_parse_discards_comment() {
        let key = SshPublicKey::parse("ssh-rsa AAAAB3NzaC1yc2E dev@example.net").unwrap();
        assert_eq!(key.algorithm, "ssh-rsa");
        assert_eq!(key.key_material, "AAAAB3NzaC1yc2E");
    }

    #[test]
    fn test_parse_discards_multi_word_comment() {
        let key = SshPublicKey::parse("ssh-rsa AAAA laptop key for dev").unwrap();
        assert_eq!(key.key_material, "AAAA");
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert!(SshPublicKey::parse("").is_none());
        assert!(SshPublicKey::parse("ssh-rsa").is_none());
        assert!(SshPublicKey::parse("   ").is_none());
    }

    #[test]
    fn test_equality_is_exact() {
        let a = SshPublicKey::new("ssh-rsa", "AAAA");
        let b = SshPublicKey::new("ssh-rsa", "AAAA");
        let c = SshPublicKey::new("ssh-ed25519", "AAAA");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_lines_skips_malformed() {
        let lines = vec![
            "ssh-ed25519 AAAA dev@example".to_string(),
            "garbage".to_string(),
            "ssh-rsa BBBB".to_string(),
        ];
        let keys = parse_lines(&lines);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].algorithm, "ssh-ed25519");
        assert_eq!(keys[1].algorithm, "ssh-rsa");
    }
}
