//! Audit events for authorization and state operations
//!
//! NIST 800-53: AU-2 (Audit Events), AU-3 (Content of Audit Records), AU-12 (Audit Generation)
//! Implementation: Structured events for every security-relevant decision
//! the bridge makes, logged through `tracing` so the host service's
//! subscriber decides the sink and format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How the remote side authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    /// Username + credential
    Password,
    /// Username + SSH public key
    SshKey,
}

/// Audit event types
///
/// NIST 800-53: AU-2 (Audit Events)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum AuditEvent {
    /// Authentication attempt
    AuthAttempt {
        /// Username attempted
        username: String,
        /// Authentication method used
        method: AuthMethod,
        /// Whether authentication succeeded
        success: bool,
        /// Event timestamp
        timestamp: DateTime<Utc>,
    },
    /// Resume state fetched for a session
    StateFetched {
        /// Username the state belongs to
        username: String,
        /// Target folder, empty for the flat strategy
        folder: String,
        /// Size of the returned checkpoint in bytes
        bytes: usize,
        /// Event timestamp
        timestamp: DateTime<Utc>,
    },
    /// Resume state saved for a session
    StateSaved {
        /// Username the state belongs to
        username: String,
        /// Target folder, empty for the flat strategy
        folder: String,
        /// Size of the stored checkpoint in bytes
        bytes: usize,
        /// Event timestamp
        timestamp: DateTime<Utc>,
    },
    /// Jail folders prepared for a user
    FoldersPrepared {
        /// Username whose jail was laid out
        username: String,
        /// Number of folders created or confirmed
        folders: usize,
        /// Event timestamp
        timestamp: DateTime<Utc>,
    },
}

impl AuditEvent {
    /// Log the audit event
    ///
    /// NIST 800-53: AU-12 (Audit Generation)
    pub fn log(&self) {
        match self {
            AuditEvent::AuthAttempt {
                username,
                method,
                success,
                ..
            } => {
                if *success {
                    info!(
                        event = "auth_success",
                        username,
                        method = ?method,
                        audit = ?self,
                        "Authentication successful"
                    );
                } else {
                    warn!(
                        event = "auth_failure",
                        username,
                        method = ?method,
                        audit = ?self,
                        "Authentication failed"
                    );
                }
            }
            AuditEvent::StateFetched {
                username,
                folder,
                bytes,
                ..
            } => {
                info!(
                    event = "state_fetched",
                    username,
                    folder,
                    bytes,
                    "Resume state fetched"
                );
            }
            AuditEvent::StateSaved {
                username,
                folder,
                bytes,
                ..
            } => {
                info!(
                    event = "state_saved",
                    username,
                    folder,
                    bytes,
                    "Resume state saved"
                );
            }
            AuditEvent::FoldersPrepared {
                username, folders, ..
            } => {
                info!(
                    event = "folders_prepared",
                    username,
                    folders,
                    "User jail folders prepared"
                );
            }
        }
    }

    /// Auth attempt event stamped with the current time
    pub fn auth_attempt(username: &str, method: AuthMethod, success: bool) -> Self {
        AuditEvent::AuthAttempt {
            username: username.to_string(),
            method,
            success,
            timestamp: Utc::now(),
        }
    }

    /// State-fetched event stamped with the current time
    pub fn state_fetched(username: &str, folder: &str, bytes: usize) -> Self {
        AuditEvent::StateFetched {
            username: username.to_string(),
            folder: folder.to_string(),
            bytes,
            timestamp: Utc::now(),
        }
    }

    /// State-saved event stamped with the current time
    pub fn state_saved(username: &str, folder: &str, bytes: usize) -> Self {
        AuditEvent::StateSaved {
            username: username.to_string(),
            folder: folder.to_string(),
            bytes,
            timestamp: Utc::now(),
        }
    }

    /// Folders-prepared event stamped with the current time
    pub fn folders_prepared(username: &str, folders: usize) -> Self {
        AuditEvent::FoldersPrepared {
            username: username.to_string(),
            folders,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_attempt_serializes_tagged() {
        let event = AuditEvent::auth_attempt("alice", AuthMethod::Password, true);
        let rendered = serde_json::to_string(&event).unwrap();
        assert!(rendered.contains("\"event_type\":\"AuthAttempt\""));
        assert!(rendered.contains("\"method\":\"password\""));
    }

    #[test]
    fn test_state_events_carry_sizes() {
        match AuditEvent::state_saved("alice", "d1", 42) {
            AuditEvent::StateSaved { bytes, folder, .. } => {
                assert_eq!(bytes, 42);
                assert_eq!(folder, "d1");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
