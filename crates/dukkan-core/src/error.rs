//! Error types for the Dukkan client stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of an API failure, used to pick the recovery affordance
/// shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The request never completed (DNS, connect, transport failure).
    Network,
    /// 401/403 - the stored credential is missing or rejected.
    Auth,
    /// 422 - the active filters themselves are likely invalid.
    Validation,
    /// 5xx - the backend failed.
    Server,
    /// Anything else.
    Unknown,
}

/// The recovery action a consumer should offer for a given error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Reload the page/request as-is.
    Reload,
    /// Clear credentials and go to the login screen.
    GoToLogin,
    /// Clear the active filters and retry.
    ClearFilters,
    /// Retry the same request.
    Retry,
}

impl ErrorKind {
    /// Maps the error kind to its recovery affordance.
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            ErrorKind::Network => RecoveryAction::Reload,
            ErrorKind::Auth => RecoveryAction::GoToLogin,
            ErrorKind::Validation => RecoveryAction::ClearFilters,
            ErrorKind::Server | ErrorKind::Unknown => RecoveryAction::Retry,
        }
    }
}

/// A shared error type for the entire Dukkan client.
///
/// API-facing variants follow the taxonomy consumed by list screens
/// (network/auth/validation/server/unknown); the remaining variants cover
/// ambient client concerns (configuration, token storage, serialization).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DukkanError {
    /// The request could not be completed at the transport level.
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the credential (401/403).
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The server rejected the request parameters (422).
    #[error("Invalid request: {message}")]
    Validation { message: String },

    /// The server failed (5xx).
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("API error: {message}")]
    Unknown { status: Option<u16>, message: String },

    /// Configuration error (bad base URL, unusable environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token/credential storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl DukkanError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Auth error
    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a Server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Classifies a non-2xx HTTP status into the API error taxonomy.
    ///
    /// 401/403 map to `Auth`, 422 to `Validation`, 5xx to `Server`, and
    /// everything else to `Unknown`. The message should already be the
    /// server's error-envelope message or the generic fallback.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth { status, message },
            422 => Self::Validation { message },
            500..=599 => Self::Server { status, message },
            _ => Self::Unknown {
                status: Some(status),
                message,
            },
        }
    }

    // ============================================================================
    // Classification
    // ============================================================================

    /// Returns the taxonomy kind for this error.
    ///
    /// Ambient client errors (config, storage, serialization) classify as
    /// `Unknown` so every error still carries a defined recovery action.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Server { .. } => ErrorKind::Server,
            Self::Unknown { .. }
            | Self::Config(_)
            | Self::Storage(_)
            | Self::Serialization { .. } => ErrorKind::Unknown,
        }
    }

    /// Returns the recovery affordance for this error.
    pub fn recovery(&self) -> RecoveryAction {
        self.kind().recovery()
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DukkanError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for DukkanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DukkanError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DukkanError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DukkanError>`.
pub type Result<T> = std::result::Result<T, DukkanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            DukkanError::from_status(401, "no token"),
            DukkanError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            DukkanError::from_status(403, "forbidden"),
            DukkanError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            DukkanError::from_status(422, "bad filter"),
            DukkanError::Validation { .. }
        ));
        assert!(matches!(
            DukkanError::from_status(503, "down"),
            DukkanError::Server { status: 503, .. }
        ));
        assert!(matches!(
            DukkanError::from_status(418, "teapot"),
            DukkanError::Unknown {
                status: Some(418),
                ..
            }
        ));
    }

    #[test]
    fn test_recovery_mapping() {
        assert_eq!(
            DukkanError::network("offline").recovery(),
            RecoveryAction::Reload
        );
        assert_eq!(
            DukkanError::auth(401, "expired").recovery(),
            RecoveryAction::GoToLogin
        );
        assert_eq!(
            DukkanError::validation("bad radius").recovery(),
            RecoveryAction::ClearFilters
        );
        assert_eq!(
            DukkanError::server(500, "boom").recovery(),
            RecoveryAction::Retry
        );
        assert_eq!(
            DukkanError::config("no base url").recovery(),
            RecoveryAction::Retry
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(DukkanError::auth(401, "x").is_auth());
        assert!(DukkanError::validation("x").is_validation());
        assert!(DukkanError::network("x").is_network());
        assert!(!DukkanError::network("x").is_auth());
    }
}
