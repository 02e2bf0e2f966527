//! Error types for dashboard operations.
//!
//! `DashError` covers everything that can go wrong between the client and the
//! backend. None of these errors is fatal to the UI: callers turn them into an
//! `"offline"` status, an `error` feed entry, or a log line.

use crate::traits::HttpError;

/// Error type for dashboard client operations
#[derive(Debug)]
pub enum DashError {
    /// Transport-level failure
    Http(HttpError),
    /// Response body was not the JSON we expected
    Json(serde_json::Error),
    /// Server returned a non-2xx status
    ServerError { status: u16, message: String },
    /// Local IO failure (log file, stdin prompt)
    Io(std::io::Error),
    /// Invalid configuration value
    Config(String),
}

/// Type alias for Results using DashError.
pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    /// Build a `ServerError` from a status code and a raw response body.
    ///
    /// Long bodies (HTML error pages) are cut so they fit on one feed line.
    pub fn server(status: u16, body: &str) -> Self {
        const MAX_BODY: usize = 200;
        let body = body.trim();
        let message = if body.chars().count() > MAX_BODY {
            let cut: String = body.chars().take(MAX_BODY).collect();
            format!("{}…", cut)
        } else {
            body.to_string()
        };
        DashError::ServerError { status, message }
    }
}

impl std::fmt::Display for DashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashError::Http(e) => write!(f, "{}", e),
            DashError::Json(e) => write!(f, "Invalid JSON response: {}", e),
            DashError::ServerError { status, message } if message.is_empty() => {
                write!(f, "Server error ({})", status)
            }
            DashError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            DashError::Io(e) => write!(f, "IO error: {}", e),
            DashError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashError::Http(e) => Some(e),
            DashError::Json(e) => Some(e),
            DashError::Io(e) => Some(e),
            DashError::ServerError { .. } | DashError::Config(_) => None,
        }
    }
}

impl From<HttpError> for DashError {
    fn from(e: HttpError) -> Self {
        DashError::Http(e)
    }
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        DashError::Json(e)
    }
}

impl From<std::io::Error> for DashError {
    fn from(e: std::io::Error) -> Self {
        DashError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_http() {
        let err: DashError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_display_server_error() {
        let err = DashError::server(500, "boom\n");
        assert_eq!(err.to_string(), "Server error (500): boom");

        let err = DashError::server(502, "   ");
        assert_eq!(err.to_string(), "Server error (502)");
    }

    #[test]
    fn test_server_error_truncates_long_body() {
        let body = "x".repeat(500);
        match DashError::server(500, &body) {
            DashError::ServerError { message, .. } => {
                assert_eq!(message.chars().count(), 201);
                assert!(message.ends_with('…'));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_json_conversion_and_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: DashError = json_err.into();
        assert!(matches!(err, DashError::Json(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Invalid JSON response"));
    }

    #[test]
    fn test_config_has_no_source() {
        let err = DashError::Config("bad url".to_string());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Configuration error: bad url");
    }
}
