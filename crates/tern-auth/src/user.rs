//! Service user records
//!
//! NIST 800-53: AC-2 (Account Management), AC-3 (Access Enforcement)
//! Implementation: Users are constructed once at service start from
//! configuration and never mutated afterward; every field accessor is a
//! pure read, safe under unbounded concurrent lookups.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::pubkey::SshPublicKey;

/// Marker file dropped into each prepared user root so operators can see
/// which backend version laid the folders out.
const REV_MARKER_FILENAME: &str = "_rev-info.txt";

/// One service user: login name, folder jail, credential, registered keys.
///
/// `folders` is the ordered list of relative paths the user may touch; an
/// empty list means the whole per-user root. The credential is an opaque
/// secret interpreted only by the injected
/// [`CredentialVerifier`](crate::credential::CredentialVerifier).
#[derive(Clone)]
pub struct User {
    username: String,
    folders: Vec<String>,
    credential: String,
    ssh_keys: Vec<SshPublicKey>,
}

impl User {
    /// Construct a user record. All fields are fixed for the process
    /// lifetime.
    pub fn new(
        username: impl Into<String>,
        folders: Vec<String>,
        credential: impl Into<String>,
        ssh_keys: Vec<SshPublicKey>,
    ) -> Self {
        Self {
            username: username.into(),
            folders,
            credential: credential.into(),
            ssh_keys,
        }
    }

    /// Unique login name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Relative jail folders; empty slice means the whole root
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// Stored credential, opaque to everything except the verifier
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Registered SSH public keys
    pub fn ssh_keys(&self) -> &[SshPublicKey] {
        &self.ssh_keys
    }

    /// Find the registered key exactly matching `(algorithm, key_material)`.
    ///
    /// NIST 800-53: IA-2 (Identification and Authentication)
    /// Implementation: Linear scan over the user's key set; first exact
    /// match on both fields wins. Key material is public, so this is an
    /// identity check, not a secret comparison.
    pub fn check_ssh_pkey(&self, algorithm: &str, key_material: &str) -> Option<&SshPublicKey> {
        self.ssh_keys
            .iter()
            .find(|k| k.algorithm == algorithm && k.key_material == key_material)
    }

    /// Create this user's jail folders under `base`.
    ///
    /// Builds `base/<username>` plus one subdirectory per configured
    /// folder, then writes a version marker into the user root. Runs once
    /// at service bootstrap, not on the connection path.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a directory or the marker file
    /// cannot be created.
    pub fn prepare_folders(&self, base: &Path) -> std::io::Result<()> {
        let user_root = base.join(&self.username);
        fs::create_dir_all(&user_root)?;

        for folder in &self.folders {
            let path = user_root.join(folder);
            fs::create_dir_all(&path)?;
            debug!(username = %self.username, folder = %path.display(), "Prepared jail folder");
        }

        fs::write(
            user_root.join(REV_MARKER_FILENAME),
            concat!(env!("CARGO_PKG_VERSION"), "\n"),
        )?;

        Ok(())
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("folders", &self.folders)
            .field("credential", &"***")
            .field("ssh_keys", &format!("[{} keys]", self.ssh_keys.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_user() -> User {
        User::new(
            "user1",
            vec!["d1/f01".to_string(), "d2".to_string()],
            "pass1",
            vec![
                SshPublicKey::new("ssh-rsa", "AAAAB3NzaC1yc2E"),
                SshPublicKey::new("ssh-ed25519", "AAAAC3NzaC1lZDI1"),
            ],
        )
    }

    #[test]
    fn test_check_ssh_pkey_exact_match() {
        let user = sample_user();
        let hit = user.check_ssh_pkey("ssh-rsa", "AAAAB3NzaC1yc2E");
        assert!(hit.is_some());
        assert_eq!(hit.unwrap().algorithm, "ssh-rsa");
    }

    #[test]
    fn test_check_ssh_pkey_requires_both_fields() {
        let user = sample_user();
        assert!(user.check_ssh_pkey("ssh-ed25519", "AAAAB3NzaC1yc2E").is_none());
        assert!(user.check_ssh_pkey("ssh-rsa", "AAAAC3NzaC1lZDI1").is_none());
        assert!(user.check_ssh_pkey("ssh-rsa", "").is_none());
    }

    #[test]
    fn test_check_ssh_pkey_empty_key_set() {
        let user = User::new("user2", Vec::new(), "pass2", Vec::new());
        assert!(user.check_ssh_pkey("ssh-rsa", "AAAA").is_none());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", sample_user());
        assert!(!rendered.contains("pass1"));
        assert!(rendered.contains("user1"));
    }

    #[test]
    fn test_prepare_folders_creates_jail() {
        let tmp = TempDir::new().unwrap();
        let user = sample_user();

        user.prepare_folders(tmp.path()).unwrap();

        assert!(tmp.path().join("user1/d1/f01").is_dir());
        assert!(tmp.path().join("user1/d2").is_dir());
        let marker = tmp.path().join("user1").join(REV_MARKER_FILENAME);
        let content = std::fs::read_to_string(marker).unwrap();
        assert_eq!(content.trim(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_prepare_folders_empty_list_creates_root_only() {
        let tmp = TempDir::new().unwrap();
        let user = User::new("user3", Vec::new(), "pass3", Vec::new());

        user.prepare_folders(tmp.path()).unwrap();

        assert!(tmp.path().join("user3").is_dir());
        assert!(tmp.path().join("user3").join(REV_MARKER_FILENAME).is_file());
    }

    #[test]
    fn test_prepare_folders_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let user = sample_user();
        user.prepare_folders(tmp.path()).unwrap();
        user.prepare_folders(tmp.path()).unwrap();
        assert!(tmp.path().join("user1/d2").is_dir());
    }
}
