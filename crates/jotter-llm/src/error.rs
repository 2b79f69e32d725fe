use jotter_core::Provider;
use thiserror::Error;

/// Errors that can occur during chat operations
///
/// Every variant is scoped to a single in-flight request; nothing here is
/// fatal to the process. Malformed stream lines and malformed tool-call
/// arguments are recovered locally and never surface as errors.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key is configured for the provider; detected before any
    /// network call
    #[error("no API key configured for {provider}")]
    MissingKey {
        /// Provider the request targeted
        provider: Provider,
    },

    /// Network-level failure other than cancellation
    #[error("{provider} request failed: {message}")]
    Transport {
        /// Provider the request targeted
        provider: Provider,
        /// Underlying transport message
        message: String,
    },

    /// The caller's cancellation signal fired
    #[error("request cancelled")]
    Cancelled,

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

    /// Provider returned 2xx but the body carried no bytes
    #[error("{provider} returned an empty response body")]
    EmptyBody {
        /// Provider the request targeted
        provider: Provider,
    },

    /// The provider response could not be decoded
    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        /// Provider the request targeted
        provider: Provider,
        /// Decoder message
        message: String,
    },

    /// Error while reading the response stream
    #[error("streaming error: {0}")]
    Streaming(String),

    /// The provider does not support the requested operation
    #[error("{provider} does not support {operation}")]
    Unsupported {
        /// Provider the request targeted
        provider: Provider,
        /// Operation that was requested
        operation: &'static str,
    },
}

impl ChatError {
    /// Whether this error is the cancellation condition
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
