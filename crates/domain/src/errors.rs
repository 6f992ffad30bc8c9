//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Main error type for Frontdesk
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FrontdeskError {
    /// Backend store rejected or failed an operation.
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to an external service.
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed or the session is invalid.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The caller's tenant scope does not permit the operation.
    ///
    /// Deliberately distinct from [`FrontdeskError::Store`] so callers can
    /// surface tenant violations differently from generic backend failures.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A staff-entered draft failed validation before any network call.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Frontdesk operations
pub type Result<T> = std::result::Result<T, FrontdeskError>;

impl FrontdeskError {
    /// Stable label for logging and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::PermissionDenied(_) => "permission_denied",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Internal(_) => "internal",
        }
    }
}
