//! Integration tests driving the relay with real WebSocket clients.
//!
//! Each test starts the server in-process on its own port and connects
//! tokio-tungstenite clients to assert the relay contract: one welcome
//! message per connection, broadcast to everyone but the sender, quiet
//! disconnects.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use idobata_server::protocol::{ADMIN_USER, ChatMessage, WELCOME_MESSAGE};
use idobata_server::run_server;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(3);
const SILENCE_TIMEOUT: Duration = Duration::from_millis(300);

/// Start a relay server on the given port and wait until it accepts connections
async fn start_server(port: u16) {
    tokio::spawn(async move {
        if let Err(e) = run_server("127.0.0.1".to_string(), port).await {
            eprintln!("Server error: {}", e);
        }
    });

    for _ in 0..50 {
        if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            return;
        }
        sleep(Duration::from_millis(50)).await;
    }
    panic!("Server did not start on port {}", port);
}

async fn connect(port: u16) -> WsClient {
    let url = format!("ws://127.0.0.1:{}/ws", port);
    let (ws_stream, _) = connect_async(&url).await.expect("Failed to connect");
    ws_stream
}

/// Read the next text frame and parse it as a ChatMessage
async fn recv_chat_message(client: &mut WsClient) -> ChatMessage {
    loop {
        let msg = timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Stream ended unexpectedly")
            .expect("WebSocket read error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).expect("Invalid chat message frame");
        }
    }
}

/// Read the next text frame without parsing it
async fn recv_raw_text(client: &mut WsClient) -> String {
    loop {
        let msg = timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Stream ended unexpectedly")
            .expect("WebSocket read error");
        if let Message::Text(text) = msg {
            return text.to_string();
        }
    }
}

/// Assert that no text frame arrives within the silence window
async fn assert_silent(client: &mut WsClient) {
    let result = timeout(SILENCE_TIMEOUT, client.next()).await;
    if let Ok(Some(Ok(Message::Text(text)))) = result {
        panic!("Expected no message, but received: {}", text);
    }
}

async fn send_chat_message(client: &mut WsClient, user: &str, message: &str) {
    let msg = ChatMessage::new(user.to_string(), message.to_string());
    let json = serde_json::to_string(&msg).unwrap();
    client
        .send(Message::Text(json.into()))
        .await
        .expect("Failed to send");
}

#[tokio::test]
async fn test_welcome_message_delivered_once_to_new_connection_only() {
    // テスト項目: 新規接続にウェルカムメッセージが 1 回だけ、その接続にのみ届く
    // given (前提条件):
    let port = 19301;
    start_server(port).await;

    // when (操作):
    let mut client1 = connect(port).await;
    let welcome1 = recv_chat_message(&mut client1).await;

    let mut client2 = connect(port).await;
    let welcome2 = recv_chat_message(&mut client2).await;

    // then (期待する結果):
    assert_eq!(welcome1.user, ADMIN_USER);
    assert_eq!(welcome1.message, WELCOME_MESSAGE);
    assert_eq!(welcome2.user, ADMIN_USER);
    assert_eq!(welcome2.message, WELCOME_MESSAGE);

    // client2 の接続は client1 に何も届けない
    assert_silent(&mut client1).await;
}

#[tokio::test]
async fn test_broadcast_excludes_sender() {
    // テスト項目: 送信したメッセージは他の接続に届き、送信者にはエコーバックされない
    // given (前提条件):
    let port = 19302;
    start_server(port).await;

    let mut client_a = connect(port).await;
    recv_chat_message(&mut client_a).await; // welcome

    let mut client_b = connect(port).await;
    recv_chat_message(&mut client_b).await; // welcome

    // when (操作): A がメッセージを送信
    send_chat_message(&mut client_a, "Diego", "Hello World").await;

    // then (期待する結果): B がそのままのペイロードを受信する
    let received = recv_chat_message(&mut client_b).await;
    assert_eq!(received.user, "Diego");
    assert_eq!(received.message, "Hello World");

    // A には何も届かない
    assert_silent(&mut client_a).await;
}

#[tokio::test]
async fn test_broadcast_with_single_client_is_noop() {
    // テスト項目: 接続が 1 件のみの場合、ブロードキャストは no-op でエラーにならない
    // given (前提条件):
    let port = 19303;
    start_server(port).await;

    let mut client = connect(port).await;
    recv_chat_message(&mut client).await; // welcome

    // when (操作): 他に誰もいない状態で送信
    send_chat_message(&mut client, "Diego", "Hello World").await;

    // then (期待する結果): 送信者には何も届かず、サーバーは生きている
    assert_silent(&mut client).await;

    let mut late_client = connect(port).await;
    let welcome = recv_chat_message(&mut late_client).await;
    assert_eq!(welcome.user, ADMIN_USER);
}

#[tokio::test]
async fn test_disconnect_is_quiet() {
    // テスト項目: 切断してもブロードキャストは発生せず、サーバーもクラッシュしない
    // given (前提条件):
    let port = 19304;
    start_server(port).await;

    let mut client_a = connect(port).await;
    recv_chat_message(&mut client_a).await; // welcome

    let mut client_b = connect(port).await;
    recv_chat_message(&mut client_b).await; // welcome

    // when (操作): B が切断
    client_b.close(None).await.expect("Failed to close");
    drop(client_b);

    // then (期待する結果): A には何も届かない
    assert_silent(&mut client_a).await;

    // サーバーは新しい接続と中継を続けられる
    let mut client_c = connect(port).await;
    recv_chat_message(&mut client_c).await; // welcome

    send_chat_message(&mut client_c, "Diego", "still alive").await;
    let received = recv_chat_message(&mut client_a).await;
    assert_eq!(received.message, "still alive");
}

#[tokio::test]
async fn test_malformed_payload_is_relayed_as_is() {
    // テスト項目: JSON として不正なフレームも検証されずにそのまま中継される
    // given (前提条件):
    let port = 19305;
    start_server(port).await;

    let mut client_a = connect(port).await;
    recv_chat_message(&mut client_a).await; // welcome

    let mut client_b = connect(port).await;
    recv_chat_message(&mut client_b).await; // welcome

    // when (操作): A が JSON でないテキストを送信
    client_a
        .send(Message::Text("not a json frame".to_string().into()))
        .await
        .expect("Failed to send");

    // then (期待する結果): B にそのまま届く
    let received = recv_raw_text(&mut client_b).await;
    assert_eq!(received, "not a json frame");
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: ヘルスチェックエンドポイントが {"status":"ok"} を返す
    // given (前提条件):
    let port = 19306;
    start_server(port).await;

    // when (操作):
    let url = format!("http://127.0.0.1:{}/api/health", port);
    let response = reqwest::get(&url).await.expect("Failed to request health");

    // then (期待する結果):
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid JSON body");
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}
