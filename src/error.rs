//! Error types for document store operations.
//!
//! Store-level failures (404, 409, 500, ...) are never errors here: the client
//! reports them as `false` or an empty document. A [`StoreError`] means the
//! exchange itself failed, or the store answered with something that is not JSON.
//!
//! # Error Categories
//!
//! | Category | Variants | Retryable |
//! |----------|----------|-----------|
//! | Network | `Transport`, `Timeout` | Yes |
//! | Payload | `Json`, `UnexpectedBody` | No |
//! | Configuration | `Config` | No |
//!
//! The client itself never retries. [`StoreError::is_retryable()`] is there for
//! callers that want to.
//!
//! # Examples
//!
//! ```
//! use couch_http::StoreError;
//!
//! let err = StoreError::Timeout;
//! assert!(err.is_retryable());
//!
//! let err = StoreError::UnexpectedBody("[1, 2]".into());
//! assert!(!err.is_retryable());
//! assert!(err.to_string().contains("[1, 2]"));
//! ```

use thiserror::Error;

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the transport or while decoding a store response.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// The HTTP exchange could not be completed (connect, DNS, read failure).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for a response.
    #[error("Request timed out")]
    Timeout,

    /// A successful response carried a body that is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A successful response carried JSON that is not an object.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// Invalid transport configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_builder() {
            StoreError::Config(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

impl StoreError {
    /// Check if this error is transient and the request may succeed when sent again.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transport(_) | StoreError::Timeout)
    }

    /// Check if this error is a timeout.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::Timeout)
    }
}
