//! # Tern State
//!
//! Durable resume-state store for incremental-sync sessions. A mirroring
//! session stores one opaque checkpoint string per user (and, in the
//! folder-map strategy, per target folder) so a reconnecting client can
//! resume delta transfers instead of recomputing a full sync.
//!
//! Two interchangeable strategies implement one contract:
//!
//! - [`FolderMapStore`]: one JSON object per user, keyed by target folder
//! - [`FlatStore`]: one opaque value per user, folder argument ignored
//!
//! Every failure mode is fail-soft. State that is missing or cannot be
//! read degrades to a cold-start checkpoint and a warning log; it never
//! aborts a transfer or crashes the serving process.

pub mod flat;
pub mod folder_map;
pub mod store;

pub use flat::FlatStore;
pub use folder_map::FolderMapStore;
pub use store::ResumeStateStore;

use std::path::PathBuf;
use std::sync::Arc;
use tern_core::StoreKind;

/// Build the configured store strategy rooted at `state_root`.
pub fn store_for(kind: StoreKind, state_root: impl Into<PathBuf>) -> Arc<dyn ResumeStateStore> {
    match kind {
        StoreKind::FolderMap => Arc::new(FolderMapStore::new(state_root)),
        StoreKind::Flat => Arc::new(FlatStore::new(state_root)),
    }
}
