//! Error types for the petcare-store crate.
//!
//! All store actions return [`StoreError`] via [`StoreResult`]. API
//! failures pass through the client's error unchanged; the store records
//! its message in the error slot on the way out.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the state containers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying API call failed.
    #[error(transparent)]
    Client(#[from] petcare_client::ClientError),

    /// Reading or writing the persisted session file failed.
    #[error("session file error: {0}")]
    SessionFile(#[from] std::io::Error),

    /// The session token could not be encoded for persistence.
    #[error("session encode error: {0}")]
    SessionEncode(#[from] serde_json::Error),
}
