//! Server state and connection management.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

/// Identifier assigned to each WebSocket connection.
///
/// Generated server-side on upgrade; the wire protocol carries no identity.
pub type ConnectionId = Uuid;

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
    /// Unix timestamp when connected (UTC, milliseconds)
    pub connected_at: i64,
}

/// Shared application state
pub struct AppState {
    /// Map of connection id to connection info
    pub connected_clients: Mutex<HashMap<ConnectionId, ClientInfo>>,
}
