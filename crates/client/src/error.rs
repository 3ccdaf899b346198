//! Error taxonomy for everything the client surfaces to a screen.
//!
//! Screens catch their own failures and render the message; nothing here is
//! retried automatically.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while talking to the remote API or mirroring state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure - the request never produced a response.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the body's `message` field (or the
    /// raw body) surfaced verbatim to the user.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not parse as the expected shape.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client-side validation failure, caught before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// The operation requires a logged-in identity and none is present.
    #[error("Please login to continue")]
    Unauthenticated,

    /// The durable-storage mirror could not be written.
    #[error("local storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
