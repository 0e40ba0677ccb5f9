//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use idobata_shared::time::{millis_to_rfc3339, now_utc_millis};

use crate::protocol::ChatMessage;

use super::{
    broadcast::broadcast_targets,
    state::{AppState, ClientInfo, ConnectionId},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Assign a fresh connection id; nothing on the wire identifies clients
    let connection_id: ConnectionId = Uuid::new_v4();

    // Create a channel for this client to receive relayed messages
    let (tx, rx) = mpsc::unbounded_channel();

    let connected_at = now_utc_millis();

    // Register the connection
    {
        let mut clients = state.connected_clients.lock().await;
        clients.insert(
            connection_id,
            ClientInfo {
                sender: tx,
                connected_at,
            },
        );
    }

    tracing::info!("Client '{}' connected and registered", connection_id);

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx))
}

pub async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    // Send the welcome message to the newly connected client only
    let welcome_json = serde_json::to_string(&ChatMessage::welcome()).unwrap();
    if let Err(e) = sender.send(Message::Text(welcome_json.into())).await {
        tracing::error!("Failed to send welcome to '{}': {}", connection_id, e);
        let mut clients = state.connected_clients.lock().await;
        clients.remove(&connection_id);
        return;
    }
    tracing::info!("Sent welcome message to '{}'", connection_id);

    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Parse for logging only; the frame is relayed verbatim,
                    // valid JSON or not
                    match serde_json::from_str::<ChatMessage>(&text) {
                        Ok(chat_msg) => {
                            tracing::info!(
                                "Received message from '{}' ({}): {}",
                                connection_id,
                                chat_msg.user,
                                chat_msg.message
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Failed to parse message as JSON, relaying as-is: {}",
                                e
                            );
                        }
                    }

                    // Relay to all connected clients EXCEPT the sender
                    let clients = state_clone.connected_clients.lock().await;
                    for (id, client_info) in broadcast_targets(&clients, connection_id) {
                        if client_info.sender.send(text.to_string()).is_err() {
                            tracing::warn!("Failed to relay message to client '{}'", id);
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed messages to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the connection; a disconnect is log-only, nothing is broadcast
    {
        let mut clients = state.connected_clients.lock().await;
        if let Some(info) = clients.remove(&connection_id) {
            tracing::info!(
                "Client '{}' disconnected (connected at {})",
                connection_id,
                millis_to_rfc3339(info.connected_at)
            );
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
