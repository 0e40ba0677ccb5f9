//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to establish the WebSocket connection
    #[error("Failed to connect to server: {0}")]
    Connect(String),

    /// Connection error during an established session
    #[error("Connection error: {0}")]
    Connection(String),
}
