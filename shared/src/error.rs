//! Error types for the baby log Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while logging an event.
#[derive(Error, Debug)]
pub enum Error {
    /// A required form field was absent
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// `_action` named an unknown form
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A date-time field could not be parsed
    #[error("Invalid date-time: {0}")]
    InvalidDateTime(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service-account authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport error talking to a remote endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Sheets API answered with a non-success status
    #[error("Sheets API error ({status}): {message}")]
    Sheets { status: u16, message: String },

    /// The app did not answer its own healthcheck probe
    #[error("Unhealthy: {0}")]
    Unhealthy(String),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingField(_) | Error::InvalidAction(_) | Error::InvalidDateTime(_) => 400,
            _ => 500,
        }
    }

    /// Opaque code returned to the UI. Server-side failures all collapse to `unknown`.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::MissingField(_) => "missing-field",
            Error::InvalidAction(_) => "invalid-action",
            Error::InvalidDateTime(_) => "invalid-date",
            _ => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(Error::MissingField("startDateTime").status_code(), 400);
        assert_eq!(Error::InvalidAction("NAP".into()).error_code(), "invalid-action");
    }

    #[test]
    fn test_remote_errors_are_opaque() {
        let err = Error::Sheets {
            status: 403,
            message: "The caller does not have permission".to_string(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "unknown");
    }
}
