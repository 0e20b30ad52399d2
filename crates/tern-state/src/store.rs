//! Resume-state store contract and shared file plumbing
//!
//! NIST 800-53: SC-24 (Fail in Known State), SI-13 (Predictable Failure Prevention)
//! Implementation: The store is a pluggable capability bound into the
//! bridge configuration; callers never observe an error from it, only a
//! cold-start default.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tern_core::validate_username;
use tracing::warn;

/// Pluggable persistence for resumable sync checkpoints.
///
/// `fetch` returns the recorded checkpoint for `(username, folder)`,
/// defaulting to the empty string when nothing is recorded or the backing
/// file cannot be used. `save` is best-effort: persistence failures are
/// logged and swallowed so an in-flight transfer is never interrupted by
/// the store.
///
/// Operations perform blocking file I/O internally and are exposed as
/// suspension points; callers must not hold locks across them. Calls for
/// different usernames touch different files and may run fully in
/// parallel.
#[async_trait]
pub trait ResumeStateStore: Send + Sync {
    /// Fetch the checkpoint for `(username, folder)`, or `""`.
    async fn fetch(&self, username: &str, folder: &str) -> String;

    /// Record `state` for `(username, folder)`. Best-effort.
    async fn save(&self, username: &str, folder: &str, state: &str);
}

/// Build `<root>/<username>.<extension>` after validating the username.
///
/// A username that fails the allow-list check never reaches the
/// filesystem; the caller degrades to the fail-soft default.
pub(crate) fn state_file_path(root: &Path, username: &str, extension: &str) -> Option<PathBuf> {
    match validate_username(username) {
        Ok(()) => Some(root.join(format!("{username}.{extension}"))),
        Err(e) => {
            warn!(error = %e, "Refusing to build state file path");
            None
        }
    }
}

/// Read a whole state file, degrading every failure to `None`.
///
/// A missing file is the normal cold-start case and is not logged; any
/// other read failure is logged at warn level.
pub(crate) async fn read_to_string_soft(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read resume state, starting cold");
            None
        }
    }
}

/// Replace `path` atomically: write a temporary sibling, then rename.
///
/// A concurrent reader sees either the previous complete file or the new
/// one, never a torn write.
pub(crate) async fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, contents).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}
