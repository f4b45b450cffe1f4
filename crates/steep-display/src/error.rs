//! Display client errors.

use thiserror::Error;

/// Errors from the kitchen display's HTTP client.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request to {endpoint} failed: {source}")]
    Http {
        /// Which endpoint was being called.
        endpoint: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status. The transition must
    /// not be assumed to have succeeded.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        /// Which endpoint was being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, when one was readable.
        message: String,
    },

    /// The client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
