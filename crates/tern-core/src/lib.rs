//! # Tern Core
//!
//! Shared types for the Tern authorization and transfer-resume backend:
//! the common error type, username validation, and the service
//! configuration consumed by the CLI and the bridge layer.

pub mod config;
pub mod error;
pub mod username;

pub use config::{CredentialScheme, ServiceConfig, StoreKind, UserEntry};
pub use error::{Error, Result};
pub use username::validate_username;
