//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use idobata_server::protocol::ChatMessage;

use crate::{error::ClientError, formatter::MessageFormatter};

/// Run the chat client session
///
/// Connects to the server, sends the startup message, then logs every
/// message relayed back until the server closes the connection or the
/// user presses Ctrl+C.
pub async fn run_client(url: &str, user: &str, message: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::Connect(e.to_string()))?;

    tracing::info!("Connected to server");

    let (mut write, mut read) = ws_stream.split();

    // Send the startup message right after connecting
    let startup = ChatMessage::new(user.to_string(), message.to_string());
    let json = serde_json::to_string(&startup)
        .map_err(|e| ClientError::Connection(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;
    println!("{}", MessageFormatter::format_sent_confirmation(&startup));

    // Spawn a task to log messages relayed by the server
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    // Try to parse as ChatMessage
                    if let Ok(chat_msg) = serde_json::from_str::<ChatMessage>(&text) {
                        println!("{}", MessageFormatter::format_chat_message(&chat_msg));
                    }
                    // If parsing fails, display as raw text
                    else {
                        println!("{}", MessageFormatter::format_raw_message(&text));
                    }
                }
                Ok(Message::Binary(data)) => {
                    println!("{}", MessageFormatter::format_binary_message(data.len()));
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Run until the server ends the session or the user interrupts
    tokio::select! {
        _ = &mut read_task => {
            tracing::info!("Lost connection with server");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            read_task.abort();
            let _ = write.send(Message::Close(None)).await;
        }
    }

    Ok(())
}
