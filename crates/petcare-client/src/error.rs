//! Client error types.
//!
//! All API operations surface errors through [`ClientError`].  Each variant
//! carries enough context for callers to decide how to handle the failure
//! without inspecting opaque strings.

/// Unified error type for the PetCare API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("request failed: {reason}")]
    Transport { reason: String },

    /// The request exceeded its time limit.
    #[error("request timed out: {reason}")]
    Timeout { reason: String },

    /// The server rejected the credentials or token (HTTP 401).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The server reported an error for this operation.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {reason}")]
    Decode { reason: String },

    /// Input was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The operation requires a bearer token but none is set.
    #[error("not authenticated: no access token is set")]
    AuthRequired,

    /// The configured base URL is not a valid URL.
    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Convenience alias used throughout the client crate.
pub type Result<T> = std::result::Result<T, ClientError>;
