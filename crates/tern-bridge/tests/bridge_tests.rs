//! Bridge composition tests
//!
//! Drives the bridge exactly as an external FTP/SFTP server library
//! would: authenticate a connection, resolve the folder jail, then fetch
//! and save resume checkpoints during the session.

use tempfile::TempDir;
use tern_auth::credential::hash_credential;
use tern_bridge::TransferBridge;
use tern_core::{CredentialScheme, ServiceConfig, StoreKind, UserEntry};

fn example_config(state_folder: &std::path::Path) -> ServiceConfig {
    ServiceConfig {
        base_folder: state_folder.join("files"),
        state_folder: state_folder.to_path_buf(),
        credential_scheme: CredentialScheme::Plain,
        store: StoreKind::FolderMap,
        users: vec![
            UserEntry {
                username: "user1".to_string(),
                credential: "pass1".to_string(),
                folders: Vec::new(),
                ssh_keys: vec!["ssh-rsa AAAAB3NzaC1yc2E dev@example.net".to_string()],
            },
            UserEntry {
                username: "user2".to_string(),
                credential: "pass2".to_string(),
                folders: vec!["d1/f01".to_string(), "d3".to_string()],
                ssh_keys: Vec::new(),
            },
        ],
    }
}

#[tokio::test]
async fn test_full_session_flow() {
    let tmp = TempDir::new().unwrap();
    let bridge = TransferBridge::from_config(&example_config(tmp.path()));

    // Connection: password auth, then jail resolution
    assert!(bridge.authenticate_password("user2", "pass2"));
    assert!(!bridge.authenticate_password("user2", "wrong"));
    let jail = bridge.allowed_folders("user2").unwrap();
    assert_eq!(jail, vec!["d1/f01".to_string(), "d3".to_string()]);

    // Session: resume checkpoints round-trip through the store
    assert_eq!(bridge.fetch_state("user2", "d3").await, "");
    bridge.save_state("user2", "d3", "checkpoint-1").await;
    assert_eq!(bridge.fetch_state("user2", "d3").await, "checkpoint-1");
    assert_eq!(bridge.fetch_state("user2", "d1/f01").await, "");
}

#[tokio::test]
async fn test_ssh_key_connection() {
    let tmp = TempDir::new().unwrap();
    let bridge = TransferBridge::from_config(&example_config(tmp.path()));

    assert!(bridge.authenticate_ssh_key("user1", "ssh-rsa", "AAAAB3NzaC1yc2E"));
    assert!(!bridge.authenticate_ssh_key("user1", "ssh-ed25519", "AAAAB3NzaC1yc2E"));
    assert!(!bridge.authenticate_ssh_key("user2", "ssh-rsa", "AAAAB3NzaC1yc2E"));
    assert!(!bridge.authenticate_ssh_key("ghost", "ssh-rsa", "AAAAB3NzaC1yc2E"));
}

#[tokio::test]
async fn test_unknown_user_has_no_jail() {
    let tmp = TempDir::new().unwrap();
    let bridge = TransferBridge::from_config(&example_config(tmp.path()));

    assert!(bridge.allowed_folders("ghost").is_none());
    assert!(bridge.allowed_folders("user1").unwrap().is_empty());
}

#[tokio::test]
async fn test_sha256_scheme_from_config() {
    let tmp = TempDir::new().unwrap();
    let mut config = example_config(tmp.path());
    config.credential_scheme = CredentialScheme::Sha256;
    config.users[0].credential = hash_credential("pass1");

    let bridge = TransferBridge::from_config(&config);
    assert!(bridge.authenticate_password("user1", "pass1"));
    assert!(!bridge.authenticate_password("user1", &hash_credential("pass1")));
}

#[tokio::test]
async fn test_flat_store_from_config() {
    let tmp = TempDir::new().unwrap();
    let mut config = example_config(tmp.path());
    config.store = StoreKind::Flat;

    let bridge = TransferBridge::from_config(&config);
    bridge.save_state("user1", "d1", "S1").await;
    bridge.save_state("user1", "d2", "S2").await;

    // Flat strategy: one slot per user, folder ignored
    assert_eq!(bridge.fetch_state("user1", "d1").await, "S2");
    assert!(tmp.path().join("user1.txt").is_file());
}

#[tokio::test]
async fn test_store_failure_never_breaks_the_session() {
    let tmp = TempDir::new().unwrap();
    let bridge = TransferBridge::from_config(&example_config(tmp.path()));

    // Corrupt the state file mid-session; the next fetch starts cold
    bridge.save_state("user1", "d1", "S1").await;
    std::fs::write(tmp.path().join("user1.json"), "}{ not json").unwrap();
    assert_eq!(bridge.fetch_state("user1", "d1").await, "");

    // And the session can keep checkpointing afterwards
    bridge.save_state("user1", "d1", "S2").await;
    assert_eq!(bridge.fetch_state("user1", "d1").await, "S2");
}
