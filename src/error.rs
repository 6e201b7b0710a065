//! Error types for findash
//!
//! All modules use `FindashResult<T>` as their return type. The variants
//! covering HTTP outcomes double as the pipeline's failure classification:
//! every failed call is returned to the caller as one of these values,
//! never as a panic.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for findash operations
pub type FindashResult<T> = Result<T, FindashError>;

/// All errors that can occur in findash
///
/// The enum is `Clone` so a refresh outcome can be shared between callers
/// attached to the same in-flight refresh.
#[derive(Error, Debug, Clone)]
pub enum FindashError {
    // HTTP outcome classification
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized (401)")]
    Unauthorized,

    #[error("You do not have permission to access this resource (403)")]
    Forbidden,

    #[error("The requested resource was not found: {0}")]
    NotFound(String),

    #[error("Server error ({status})")]
    Server { status: u16 },

    #[error("Request rejected ({status}): {message}")]
    Client { status: u16, message: String },

    // Session errors
    #[error("Session expired, login required")]
    SessionExpired,

    #[error("No active session")]
    NoSession,

    #[error("Login to {provider} failed: {reason}")]
    LoginFailed { provider: String, reason: String },

    #[error("Registration failed: {reason}")]
    RegistrationFailed { reason: String },

    // Local storage errors
    #[error("Storage error: {context}: {message}")]
    Storage { context: String, message: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    #[error("TOML error: {0}")]
    Toml(String),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl FindashError {
    /// Create a storage error with context
    pub fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            context: context.into(),
            message: source.to_string(),
        }
    }

    /// Stable label for the failure kind, used by instrumentation
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Server { .. } => "server_error",
            Self::Client { .. } => "client_error",
            Self::SessionExpired => "session_expired",
            Self::NoSession => "no_session",
            Self::LoginFailed { .. } => "login_failed",
            Self::RegistrationFailed { .. } => "registration_failed",
            Self::Storage { .. } => "storage",
            Self::ConfigInvalid { .. } => "config_invalid",
            Self::Json(_) => "json",
            Self::Toml(_) => "toml",
            Self::Internal(_) => "internal",
            Self::User(_) => "user",
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::SessionExpired | Self::NoSession | Self::Unauthorized => {
                Some("Run: findash login")
            }
            Self::Network(_) => Some("Check your connection and the api.base_url config value"),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FindashError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<toml::de::Error> for FindashError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

impl From<toml::ser::Error> for FindashError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FindashError::Forbidden;
        assert!(err.to_string().contains("permission"));

        let err = FindashError::Server { status: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn error_kind_labels() {
        assert_eq!(FindashError::Unauthorized.kind(), "unauthorized");
        assert_eq!(FindashError::Network("timeout".into()).kind(), "network");
        assert_eq!(FindashError::SessionExpired.kind(), "session_expired");
    }

    #[test]
    fn error_hint() {
        assert_eq!(
            FindashError::SessionExpired.hint(),
            Some("Run: findash login")
        );
        assert_eq!(FindashError::Forbidden.hint(), None);
    }
}
