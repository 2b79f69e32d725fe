use jotter_core::Provider;
use thiserror::Error;

/// Errors from single-shot media operations
#[derive(Debug, Error)]
pub enum MediaError {
    /// No API key is configured for the provider; detected before any
    /// network call
    #[error("no API key configured for {provider}")]
    MissingKey {
        /// Provider the request targeted
        provider: Provider,
    },

    /// The provider does not implement this operation
    #[error("{provider} does not support {operation}")]
    Unsupported {
        /// Provider the request targeted
        provider: Provider,
        /// Operation that was requested
        operation: &'static str,
    },

    /// Network-level failure
    #[error("{provider} request failed: {message}")]
    Connection {
        /// Provider the request targeted
        provider: Provider,
        /// Underlying transport message
        message: String,
    },

    /// Provider returned a non-2xx response
    #[error("{provider} returned {status}: {body}")]
    Api {
        /// Provider the request targeted
        provider: Provider,
        /// HTTP status code
        status: u16,
        /// Response body, truncated for display
        body: String,
    },

    /// The provider response could not be decoded
    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        /// Provider the request targeted
        provider: Provider,
        /// Decoder message
        message: String,
    },

    /// The response decoded cleanly but carried none of the expected
    /// content
    #[error("{provider} returned no {expected}")]
    EmptyResult {
        /// Provider the request targeted
        provider: Provider,
        /// What the caller asked for
        expected: &'static str,
    },
}
