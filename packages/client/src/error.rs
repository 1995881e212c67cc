//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The name is already online
    #[error("Name '{0}' is already online")]
    DuplicateName(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
