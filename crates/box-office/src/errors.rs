//! Error types for box-office lookups.

use thiserror::Error;

/// Errors that can occur while fetching box-office data.
///
/// None of these are meant to reach an end user. The enrichment layer in
/// `reelrate-core` logs them and carries on without data.
#[derive(Error, Debug)]
pub enum BoxOfficeError {
    /// The provider did not answer within the configured timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Unexpected status from {provider}: {status}")]
    UnexpectedStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the body
        provider: String,
        /// Decoder message
        message: String,
    },

    /// The provider URL could not be used to build a request.
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl BoxOfficeError {
    /// Whether the failure came from the transport rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BoxOfficeError::Timeout { .. } | BoxOfficeError::Network(_)
        )
    }
}
