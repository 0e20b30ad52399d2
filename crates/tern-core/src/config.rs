//! Service configuration for the authorization and transfer-resume backend

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::username::validate_username;

/// Top-level service configuration
///
/// Loaded from a TOML file by the CLI and handed to the bridge layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base folder holding the per-user jail directories
    #[serde(default = "default_base_folder")]
    pub base_folder: PathBuf,

    /// Root folder for persisted resume-state files
    #[serde(default = "default_state_folder")]
    pub state_folder: PathBuf,

    /// Credential comparison strategy applied to all users
    #[serde(default)]
    pub credential_scheme: CredentialScheme,

    /// Resume-state persistence strategy
    #[serde(default)]
    pub store: StoreKind,

    /// Configured service users
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// Credential comparison strategy, selected once for the whole service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScheme {
    /// Stored credential is the secret itself
    #[default]
    Plain,
    /// Stored credential is the lowercase hex SHA-256 digest of the secret
    Sha256,
}

/// Resume-state persistence strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    /// One JSON object per user, keyed by target folder
    #[default]
    FolderMap,
    /// One opaque value per user; folder arguments are ignored
    Flat,
}

/// One configured user, in raw configuration-file shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    /// Unique login name
    pub username: String,

    /// Stored credential, interpreted per [`CredentialScheme`]
    #[serde(default)]
    pub credential: String,

    /// Relative jail folders this user may touch; empty means whole root
    #[serde(default)]
    pub folders: Vec<String>,

    /// SSH public key lines (`<algorithm> <base64> [comment]`)
    #[serde(default)]
    pub ssh_keys: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_folder: default_base_folder(),
            state_folder: default_state_folder(),
            credential_scheme: CredentialScheme::default(),
            store: StoreKind::default(),
            users: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for the first violation found:
    /// empty folder settings, invalid usernames, absolute or traversing
    /// jail folders, or users with neither a credential nor an SSH key.
    pub fn validate(&self) -> crate::Result<()> {
        if self.base_folder.as_os_str().is_empty() {
            return Err(crate::Error::Config("base_folder must not be empty".into()));
        }

        if self.state_folder.as_os_str().is_empty() {
            return Err(crate::Error::Config(
                "state_folder must not be empty".into(),
            ));
        }

        for user in &self.users {
            validate_username(&user.username).map_err(|e| {
                crate::Error::Config(format!("user entry rejected: {}", e))
            })?;

            if user.credential.is_empty() && user.ssh_keys.is_empty() {
                return Err(crate::Error::Config(format!(
                    "user '{}' has neither a credential nor an SSH key",
                    user.username
                )));
            }

            for folder in &user.folders {
                if !is_safe_relative(Path::new(folder)) {
                    return Err(crate::Error::Config(format!(
                        "user '{}': folder '{}' must be relative and must not traverse upward",
                        user.username, folder
                    )));
                }
            }
        }

        Ok(())
    }
}

/// A jail folder must stay inside the user root: relative, no `..`.
fn is_safe_relative(path: &Path) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }
    path.components().all(|c| match c {
        Component::Normal(_) | Component::CurDir => true,
        Component::ParentDir | Component::RootDir | Component::Prefix(_) => false,
    })
}

fn default_base_folder() -> PathBuf {
    PathBuf::from("/var/lib/tern/files")
}

fn default_state_folder() -> PathBuf {
    PathBuf::from("/var/lib/tern/state")
}
