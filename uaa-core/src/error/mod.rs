//! Unified error handling for UAA Core

use reqwest::StatusCode;
use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, UaaError>;

/// UAA client error types
#[derive(Error, Debug)]
pub enum UaaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", describe_http(.status, .error, .description))]
    Http {
        status: StatusCode,
        /// UAA `error` code, when the body carried one
        error: Option<String>,
        /// UAA `error_description`, when the body carried one
        description: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{kind} {key} not found")]
    NotFound { kind: String, key: String },

    #[error("{kind} {key} already exists")]
    AlreadyExists { kind: String, key: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Group '{name}' was not found in zone '{zone}'")]
    GroupNotFound { zone: String, name: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

fn describe_http(
    status: &StatusCode,
    error: &Option<String>,
    description: &Option<String>,
) -> String {
    match (error, description) {
        (Some(code), Some(desc)) => format!(
            "Server error, status code: {}, error code: {}, message: {}",
            status.as_u16(),
            code,
            desc
        ),
        (Some(code), None) => format!(
            "Server error, status code: {}, error code: {}",
            status.as_u16(),
            code
        ),
        (None, Some(desc)) => format!(
            "Server error, status code: {}, message: {}",
            status.as_u16(),
            desc
        ),
        (None, None) => format!("Server error, status code: {}", status.as_u16()),
    }
}

impl UaaError {
    pub fn not_found(kind: impl Into<String>, key: impl Into<String>) -> Self {
        UaaError::NotFound {
            kind: kind.into(),
            key: key.into(),
        }
    }

    pub fn already_exists(kind: impl Into<String>, key: impl Into<String>) -> Self {
        UaaError::AlreadyExists {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// HTTP status of the failed call, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UaaError::Http { status, .. } => Some(*status),
            UaaError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    /// True for structured lookups that came back empty and for plain 404s.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UaaError::NotFound { .. }) || self.status() == Some(StatusCode::NOT_FOUND)
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for UaaError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UaaError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = UaaError::not_found("User", "does-not-exist");
        assert_eq!(err.to_string(), "User does-not-exist not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_already_exists_display() {
        let err = UaaError::already_exists("client", "my-client");
        assert_eq!(err.to_string(), "client my-client already exists");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_http_error_display_with_body() {
        let err = UaaError::Http {
            status: StatusCode::BAD_REQUEST,
            error: Some("invalid_client".to_string()),
            description: Some("Bad client".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Server error, status code: 400, error code: invalid_client, message: Bad client"
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_http_404_is_not_found() {
        let err = UaaError::Http {
            status: StatusCode::NOT_FOUND,
            error: None,
            description: None,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Server error, status code: 404");
    }

    #[test]
    fn test_conflict_detection() {
        let err = UaaError::Http {
            status: StatusCode::CONFLICT,
            error: Some("scim_resource_already_exists".to_string()),
            description: None,
        };
        assert!(err.is_conflict());
    }

    #[test]
    fn test_group_not_found_display() {
        let err = UaaError::GroupNotFound {
            zone: "uaa".to_string(),
            name: "scim.read".to_string(),
        };
        assert_eq!(err.to_string(), "Group 'scim.read' was not found in zone 'uaa'");
    }

    #[test]
    fn test_decode_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: UaaError = parse_err.into();
        assert!(matches!(err, UaaError::Decode(_)));
    }
}
