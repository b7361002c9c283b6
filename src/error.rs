//! Error types for the reading list core
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by where they surface in the app (validation, import,
//! configuration) so the presentation layer can decide how to show them.
//!
//! ## Error Taxonomy
//!
//! ### Not found
//! Updating or deleting an unknown book id is NOT an error. The store reports
//! absence (`None` / `true`) and the controller treats it as a no-op.
//!
//! ### Validation
//! - Blank title on insert, malformed bridge command → `InvalidInput`
//!
//! ### Import / transport
//! - Non-2xx response → `ApiRequestFailed`
//! - Payload that is not a list of `{title, author?}` → `InvalidApiResponse`
//! - Connection, DNS or timeout failures → `NetworkError`
//!
//! Import failures never abort the process. The controller stores the message
//! as `import_error` and leaves already-loaded state intact.

use thiserror::Error;

/// Result type alias using our ReadingListError type
pub type Result<T> = std::result::Result<T, ReadingListError>;

/// Main error type for the reading list core
#[derive(Error, Debug)]
pub enum ReadingListError {
    // ===== Import / API Errors =====

    /// Remote source answered with a non-success status
    #[error("API request failed: {message}")]
    ApiRequestFailed {
        message: String,
        /// HTTP status code if available
        status_code: Option<u16>,
        /// Endpoint that failed
        endpoint: Option<String>,
    },

    /// Remote source returned a payload we could not parse
    #[error("Invalid API response: {message}")]
    InvalidApiResponse {
        message: String,
        /// Response body snippet for debugging
        response_body: Option<String>,
    },

    /// Network connectivity error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        /// Whether this error might be transient
        is_transient: bool,
    },

    // ===== Validation Errors =====

    /// Generic input validation error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Configuration/State Errors =====

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Application state is invalid for the requested operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ===== General Errors =====

    /// Internal error that should not normally occur
    #[error("Internal error: {0}")]
    InternalError(String),

    // ===== External Library Errors =====

    /// HTTP client error from reqwest
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

// Helper methods for creating common errors
impl ReadingListError {
    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ReadingListError::InvalidInput(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        ReadingListError::InternalError(message.into())
    }

    /// Create an ApiRequestFailed error
    pub fn api_failed<S: Into<String>>(
        message: S,
        status_code: Option<u16>,
        endpoint: Option<String>,
    ) -> Self {
        ReadingListError::ApiRequestFailed {
            message: message.into(),
            status_code,
            endpoint,
        }
    }

    /// Create a NetworkError
    pub fn network_error<S: Into<String>>(message: S, is_transient: bool) -> Self {
        ReadingListError::NetworkError {
            message: message.into(),
            is_transient,
        }
    }

    /// Check if error was caused by bad caller input
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ReadingListError::InvalidInput(_))
    }

    /// Check if error came out of the import fetch/parse path
    pub fn is_import_error(&self) -> bool {
        matches!(
            self,
            ReadingListError::ApiRequestFailed { .. }
                | ReadingListError::InvalidApiResponse { .. }
                | ReadingListError::NetworkError { .. }
                | ReadingListError::ReqwestError(_)
                | ReadingListError::SerdeJsonError(_)
        )
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Response bodies and parser internals are left out; the full error is
    /// still available through `Display` for logs.
    pub fn user_message(&self) -> String {
        match self {
            ReadingListError::ApiRequestFailed { status_code: Some(code), .. } => {
                format!("Import failed: the server responded with status {}.", code)
            }
            ReadingListError::ApiRequestFailed { status_code: None, message, .. } => {
                format!("Import failed: {}", message)
            }
            ReadingListError::InvalidApiResponse { .. } | ReadingListError::SerdeJsonError(_) => {
                "Import failed: the server returned data in an unexpected format.".to_string()
            }
            ReadingListError::NetworkError { .. } | ReadingListError::ReqwestError(_) => {
                "Import failed: could not reach the server. Check your connection and try again."
                    .to_string()
            }
            ReadingListError::InvalidInput(message) => message.clone(),
            _ => self.to_string(),
        }
    }
}
