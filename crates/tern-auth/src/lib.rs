//! # Tern Auth
//!
//! Per-connection authorization for the Tern file-service backend:
//! SSH public key records, swappable credential verification, and the
//! read-only user registry consulted by every inbound connection.
//!
//! All checks are pure CPU-bound comparisons over state that is immutable
//! after construction, so they are safe to call concurrently from any
//! number of connection workers without coordination.

pub mod credential;
pub mod pubkey;
pub mod registry;
pub mod user;

pub use credential::{CredentialVerifier, PlainVerifier, Sha256Verifier};
pub use pubkey::SshPublicKey;
pub use registry::UserRegistry;
pub use user::User;
