//! Broadcast-target selection logic.
//!
//! This module contains pure functions that implement the relay's
//! exclusion rule without side effects, making them easy to test.

use std::collections::HashMap;

use super::state::{ClientInfo, ConnectionId};

/// Get broadcast targets (all connections except the originator).
///
/// # Arguments
///
/// * `connected_clients` - Map of connection id to connection info
/// * `exclude` - The connection id to exclude from the result
///
/// # Returns
///
/// A vector of tuples containing (connection_id, ClientInfo) for all
/// connections except the excluded one
pub fn broadcast_targets<'a>(
    connected_clients: &'a HashMap<ConnectionId, ClientInfo>,
    exclude: ConnectionId,
) -> Vec<(&'a ConnectionId, &'a ClientInfo)> {
    connected_clients
        .iter()
        .filter(|(connection_id, _)| **connection_id != exclude)
        .collect()
}
