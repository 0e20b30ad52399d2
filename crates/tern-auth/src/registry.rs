//! User registry
//!
//! NIST 800-53: AC-2 (Account Management), IA-2 (Identification and Authentication)
//! Implementation: Read-only username map built once at service start.
//! Lookups are lock-free; the registry is shared across connection workers
//! behind an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use tern_core::UserEntry;

use crate::credential::CredentialVerifier;
use crate::pubkey::{self, SshPublicKey};
use crate::user::User;

/// Immutable-after-construction map from username to [`User`], with the
/// credential comparison strategy injected at build time.
pub struct UserRegistry {
    users: HashMap<String, Arc<User>>,
    duplicates: Vec<String>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl UserRegistry {
    /// Build a registry from an ordered collection of users.
    ///
    /// A later entry with an already-seen username replaces the earlier
    /// one (last write wins); every such collision is recorded and exposed
    /// through [`duplicate_usernames`](Self::duplicate_usernames) so
    /// callers can surface or reject the misconfiguration.
    pub fn build(users: Vec<User>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        let mut map: HashMap<String, Arc<User>> = HashMap::with_capacity(users.len());
        let mut duplicates = Vec::new();

        for user in users {
            let username = user.username().to_string();
            if map.insert(username.clone(), Arc::new(user)).is_some() {
                warn!(username = %username, "Duplicate username in registry, later entry wins");
                if !duplicates.contains(&username) {
                    duplicates.push(username);
                }
            }
        }

        Self {
            users: map,
            duplicates,
            verifier,
        }
    }

    /// Build a registry straight from raw configuration entries.
    ///
    /// SSH key lines are parsed tolerantly: malformed lines are logged and
    /// skipped without failing the build.
    pub fn from_entries(entries: &[UserEntry], verifier: Arc<dyn CredentialVerifier>) -> Self {
        let users = entries
            .iter()
            .map(|entry| {
                User::new(
                    entry.username.clone(),
                    entry.folders.clone(),
                    entry.credential.clone(),
                    pubkey::parse_lines(&entry.ssh_keys),
                )
            })
            .collect();
        Self::build(users, verifier)
    }

    /// Look up a user by name. O(1) expected.
    pub fn lookup(&self, username: &str) -> Option<&Arc<User>> {
        self.users.get(username)
    }

    /// Usernames that appeared more than once during construction
    pub fn duplicate_usernames(&self) -> &[String] {
        &self.duplicates
    }

    /// Check a remote-presented credential for `username`.
    ///
    /// Delegates to the injected [`CredentialVerifier`]. Unknown usernames
    /// are rejected.
    pub fn check_credential(&self, username: &str, remote_credential: &str) -> bool {
        match self.lookup(username) {
            Some(user) => self.verifier.verify(user, remote_credential),
            None => {
                debug!(username = %username, "Credential check for unknown username");
                false
            }
        }
    }

    /// Check a remote-presented SSH key for `username`.
    ///
    /// Returns the matching registered key, or `None` for unknown users
    /// and unregistered keys.
    pub fn check_ssh_pkey(
        &self,
        username: &str,
        algorithm: &str,
        key_material: &str,
    ) -> Option<&SshPublicKey> {
        match self.lookup(username) {
            Some(user) => user.check_ssh_pkey(algorithm, key_material),
            None => {
                debug!(username = %username, "SSH key check for unknown username");
                None
            }
        }
    }

    /// All registered usernames, unordered
    pub fn usernames(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate over all registered users
    pub fn users(&self) -> impl Iterator<Item = &Arc<User>> {
        self.users.values()
    }
}

impl std::fmt::Debug for UserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegistry")
            .field("users", &self.users.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}
