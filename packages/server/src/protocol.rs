//! Wire protocol for the chat relay.
//!
//! Every frame is a JSON-encoded [`ChatMessage`] carrying the event name
//! and its payload. The only event is `sendMessage`, used in both
//! directions: client to server to submit a message, server to client for
//! the relayed copy and for the one-time welcome push.

use serde::{Deserialize, Serialize};

/// User name the server signs its welcome message with
pub const ADMIN_USER: &str = "Admin";

/// Text of the welcome message pushed to every new connection
pub const WELCOME_MESSAGE: &str = "Welcome to this app";

/// Event names carried in the `event` field of a wire frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// A chat message, in either direction
    SendMessage,
}

/// A chat message as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub event: EventType,
    pub user: String,
    pub message: String,
}

impl ChatMessage {
    /// Create a `sendMessage` event with the given user and text
    pub fn new(user: String, message: String) -> Self {
        Self {
            event: EventType::SendMessage,
            user,
            message,
        }
    }

    /// The welcome message pushed to a newly connected client
    pub fn welcome() -> Self {
        Self::new(ADMIN_USER.to_string(), WELCOME_MESSAGE.to_string())
    }
}
