//! Message formatting utilities for client display.

use idobata_server::protocol::ChatMessage;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message relayed by the server
    pub fn format_chat_message(msg: &ChatMessage) -> String {
        format!("@{}: {}", msg.user, msg.message)
    }

    /// Format a confirmation line after sending the startup message
    pub fn format_sent_confirmation(msg: &ChatMessage) -> String {
        format!("sent '{}' as '{}'", msg.message, msg.user)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("← Received: {}", text)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("← Received {} bytes of binary data", byte_count)
    }
}
