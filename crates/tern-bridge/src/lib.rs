//! # Tern Bridge
//!
//! The external-facing composition of the Tern backend: binds the user
//! registry's authorization checks, the per-user folder jail data, and the
//! resume-state store's fetch/save pair into the shape an FTP/SFTP server
//! library consumes as callbacks. The bridge adds no logic of its own
//! beyond audit logging; it exists to satisfy the contract boundary.

pub mod audit;

use std::sync::Arc;

use tern_auth::credential::verifier_for;
use tern_auth::UserRegistry;
use tern_core::ServiceConfig;
use tern_state::{ResumeStateStore, store_for};

pub use audit::{AuditEvent, AuthMethod};

/// Composition of registry and store handed to the transfer-protocol
/// server library.
///
/// Cheap to clone; all state is shared behind `Arc`s, so one bridge can
/// serve every connection worker.
#[derive(Clone)]
pub struct TransferBridge {
    registry: Arc<UserRegistry>,
    store: Arc<dyn ResumeStateStore>,
}

impl TransferBridge {
    /// Compose a bridge from an already-built registry and store.
    pub fn new(registry: Arc<UserRegistry>, store: Arc<dyn ResumeStateStore>) -> Self {
        Self { registry, store }
    }

    /// Build the whole backend from service configuration: resolve the
    /// credential strategy, construct the registry, and root the
    /// configured store strategy.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let verifier = verifier_for(config.credential_scheme);
        let registry = Arc::new(UserRegistry::from_entries(&config.users, verifier));
        let store = store_for(config.store, config.state_folder.clone());
        Self::new(registry, store)
    }

    /// The shared user registry
    pub fn registry(&self) -> &Arc<UserRegistry> {
        &self.registry
    }

    /// Per-connection password check.
    ///
    /// NIST 800-53: IA-2 (Identification and Authentication)
    pub fn authenticate_password(&self, username: &str, credential: &str) -> bool {
        let success = self.registry.check_credential(username, credential);
        AuditEvent::auth_attempt(username, AuthMethod::Password, success).log();
        success
    }

    /// Per-connection SSH public key check.
    ///
    /// NIST 800-53: IA-2 (Identification and Authentication)
    pub fn authenticate_ssh_key(&self, username: &str, algorithm: &str, key_material: &str) -> bool {
        let success = self
            .registry
            .check_ssh_pkey(username, algorithm, key_material)
            .is_some();
        AuditEvent::auth_attempt(username, AuthMethod::SshKey, success).log();
        success
    }

    /// The folder jail for `username`, or `None` for unknown users.
    ///
    /// An empty list means the whole per-user root. Enforcement is the
    /// server library's job; this only supplies the data.
    pub fn allowed_folders(&self, username: &str) -> Option<Vec<String>> {
        self.registry
            .lookup(username)
            .map(|user| user.folders().to_vec())
    }

    /// Fetch the resume checkpoint for `(username, folder)`, `""` when
    /// none is recorded or the store cannot read it.
    pub async fn fetch_state(&self, username: &str, folder: &str) -> String {
        let state = self.store.fetch(username, folder).await;
        AuditEvent::state_fetched(username, folder, state.len()).log();
        state
    }

    /// Record the resume checkpoint for `(username, folder)`. Best-effort;
    /// a persistence failure is logged inside the store and never
    /// surfaces here.
    pub async fn save_state(&self, username: &str, folder: &str, state: &str) {
        self.store.save(username, folder, state).await;
        AuditEvent::state_saved(username, folder, state.len()).log();
    }
}

impl std::fmt::Debug for TransferBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferBridge")
            .field("registry", &self.registry)
            .finish()
    }
}
