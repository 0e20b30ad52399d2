//! Per-folder-map persistence strategy
//!
//! NIST 800-53: SC-8 (Transmission Integrity), SI-13 (Predictable Failure Prevention)
//! Implementation: One JSON object per user keyed by target folder, so
//! concurrent sessions against different folders keep independent
//! checkpoints. The read-modify-write cycle is serialized per username.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::store::{ResumeStateStore, read_to_string_soft, state_file_path, write_atomic};

/// Folder-keyed resume-state store.
///
/// Persists `<state_root>/<username>.json`, a JSON object mapping folder
/// path strings to opaque checkpoint strings. Saving one folder rewrites
/// the whole file, so saves for the same username are serialized behind a
/// per-username mutex; the replacement itself is atomic (temp file +
/// rename), so fetches never need the lock.
pub struct FolderMapStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FolderMapStore {
    /// Create a store rooted at `state_root`. The directory is expected to
    /// exist; a missing root degrades to cold-start fetches and logged
    /// save failures, consistent with the rest of the fail-soft contract.
    pub fn new(state_root: impl Into<PathBuf>) -> Self {
        Self {
            root: state_root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The per-username writer lock. Entries are created on first use and
    /// retained for the process lifetime; the set of usernames is bounded
    /// by configuration.
    async fn user_lock(&self, username: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(
            locks
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Load the folder map, degrading every failure to an empty map.
    async fn load_map(path: &Path) -> HashMap<String, String> {
        let Some(contents) = read_to_string_soft(path).await else {
            return HashMap::new();
        };

        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Corrupt resume-state file, starting cold"
                );
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl ResumeStateStore for FolderMapStore {
    async fn fetch(&self, username: &str, folder: &str) -> String {
        let Some(path) = state_file_path(&self.root, username, "json") else {
            return String::new();
        };

        Self::load_map(&path)
            .await
            .remove(folder)
            .unwrap_or_default()
    }

    async fn save(&self, username: &str, folder: &str, state: &str) {
        let Some(path) = state_file_path(&self.root, username, "json") else {
            return;
        };

        let lock = self.user_lock(username).await;
        let _guard = lock.lock().await;

        let mut map = Self::load_map(&path).await;
        map.insert(folder.to_string(), state.to_string());

        let contents = match serde_json::to_string(&map) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(username = %username, error = %e, "Cannot serialize resume state");
                return;
            }
        };

        match write_atomic(&path, &contents).await {
            Ok(()) => debug!(username = %username, folder = %folder, "Resume state saved"),
            Err(e) => {
                warn!(username = %username, error = %e, "Cannot save resume state");
            }
        }
    }
}
