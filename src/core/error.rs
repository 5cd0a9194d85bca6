//! Custom error types for the application.
//!
//! Provides structured error handling for each domain:
//!
//! - [`StorageError`] - localStorage/sessionStorage access
//! - [`DomError`] - DOM API calls that may throw in non-standard environments
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`ContentError`] - Embedded site content that fails to parse
//! - [`UnknownValue`] - A string that names no known theme, mode, filter or sort key

use thiserror::Error;

/// Key-value storage errors.
///
/// Storage may be disabled by the browser (private mode, policy) or throw on
/// quota exhaustion. Callers in the theme layer recover from every variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage is not available in this environment.
    #[error("storage not available")]
    Unavailable,
    /// Reading a key threw.
    #[error("failed to read `{0}` from storage")]
    ReadFailed(String),
    /// Writing a key threw (quota exceeded, disabled storage).
    #[error("failed to write `{0}` to storage")]
    WriteFailed(String),
    /// Removing a key threw.
    #[error("failed to remove `{0}` from storage")]
    RemoveFailed(String),
}

/// DOM access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Browser window not available.
    #[error("browser window not available")]
    NoWindow,
    /// Document not available.
    #[error("document not available")]
    NoDocument,
    /// A resource exists but cannot be introspected (e.g. cross-origin stylesheet).
    #[error("{0} is not accessible")]
    Inaccessible(String),
    /// A DOM call threw.
    #[error("{op} failed: {detail}")]
    OperationFailed {
        /// Name of the DOM operation.
        op: &'static str,
        /// Stringified JavaScript exception.
        detail: String,
    },
}

impl DomError {
    /// Builds an [`DomError::OperationFailed`] from a thrown JavaScript value.
    pub fn failed(op: &'static str, err: impl std::fmt::Debug) -> Self {
        Self::OperationFailed {
            op,
            detail: format!("{:?}", err),
        }
    }
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("request timed out")]
    Timeout,
}

/// Errors loading the embedded site content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// `site.toml` is not valid TOML or does not match the content schema.
    #[error("invalid site content: {0}")]
    Parse(String),
}

/// A string that does not name any known value of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownValue {
    /// What was being parsed ("theme", "mode", ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownValue {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_value_message() {
        let err = UnknownValue::new("theme", "sepia");
        assert_eq!(err.to_string(), "unknown theme `sepia`");
    }

    #[test]
    fn test_dom_error_failed_keeps_operation() {
        let err = DomError::failed("pushState", "SecurityError");
        assert_eq!(
            err,
            DomError::OperationFailed {
                op: "pushState",
                detail: "\"SecurityError\"".to_string()
            }
        );
        assert!(err.to_string().starts_with("pushState failed"));
    }
}
