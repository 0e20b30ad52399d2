//! Credential verification strategies
//!
//! NIST 800-53: IA-5 (Authenticator Management), SC-13 (Cryptographic Protection)
//! Implementation: The comparison policy is a strategy injected at registry
//! construction, so the whole service can move from plaintext to hashed
//! credentials without touching the `User` type or any call site.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tern_core::CredentialScheme;

use crate::user::User;

/// Swappable credential comparison strategy.
///
/// Invoked once per inbound connection with the registered user and the
/// remote-presented secret. Implementations must be pure and free of I/O;
/// they run on every connection worker concurrently.
pub trait CredentialVerifier: Send + Sync {
    /// Return `true` if `remote_credential` is accepted for `user`.
    fn verify(&self, user: &User, remote_credential: &str) -> bool;
}

/// Exact-match verifier: the stored credential is the secret itself.
///
/// Both sides are reduced to SHA-256 digests before comparison, so the
/// comparison cost does not depend on where the secrets first differ.
pub struct PlainVerifier;

impl CredentialVerifier for PlainVerifier {
    fn verify(&self, user: &User, remote_credential: &str) -> bool {
        digest(user.credential()) == digest(remote_credential)
    }
}

/// Hashed verifier: the stored credential is the lowercase hex SHA-256
/// digest of the secret, as produced by [`hash_credential`].
pub struct Sha256Verifier;

impl CredentialVerifier for Sha256Verifier {
    fn verify(&self, user: &User, remote_credential: &str) -> bool {
        let presented = hash_credential(remote_credential);
        digest(&user.credential().to_ascii_lowercase()) == digest(&presented)
    }
}

/// Hash a secret for storage under [`Sha256Verifier`].
pub fn hash_credential(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Resolve the configured scheme to a verifier instance.
pub fn verifier_for(scheme: CredentialScheme) -> Arc<dyn CredentialVerifier> {
    match scheme {
        CredentialScheme::Plain => Arc::new(PlainVerifier),
        CredentialScheme::Sha256 => Arc::new(Sha256Verifier),
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
