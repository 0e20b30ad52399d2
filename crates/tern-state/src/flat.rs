//! Flat single-value persistence strategy

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::store::{ResumeStateStore, read_to_string_soft, state_file_path, write_atomic};

/// Single-slot resume-state store.
///
/// Persists `<state_root>/<username>.txt`, whose entire content is the
/// checkpoint string. The folder argument is accepted and ignored, so two
/// sessions against different target folders share one slot and the last
/// save wins. Kept for single-target deployments where the folder-keyed
/// map is unnecessary.
pub struct FlatStore {
    root: PathBuf,
}

impl FlatStore {
    /// Create a store rooted at `state_root`.
    pub fn new(state_root: impl Into<PathBuf>) -> Self {
        Self {
            root: state_root.into(),
        }
    }
}

#[async_trait]
impl ResumeStateStore for FlatStore {
    async fn fetch(&self, username: &str, _folder: &str) -> String {
        let Some(path) = state_file_path(&self.root, username, "txt") else {
            return String::new();
        };
        read_to_string_soft(&path).await.unwrap_or_default()
    }

    async fn save(&self, username: &str, _folder: &str, state: &str) {
        let Some(path) = state_file_path(&self.root, username, "txt") else {
            return;
        };

        match write_atomic(&path, state).await {
            Ok(()) => debug!(username = %username, "Resume state saved"),
            Err(e) => {
                warn!(username = %username, error = %e, "Cannot save resume state");
            }
        }
    }
}
