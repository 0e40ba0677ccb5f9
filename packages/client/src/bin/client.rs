//! Simple WebSocket chat client.
//!
//! Connects to a chat relay server, sends one startup message, and logs
//! every message relayed back. Purely a console smoke test of the
//! transport: no prompt, no input handling.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-client
//! cargo run --bin idobata-client -- --user Diego --message "Hello World"
//! ```

use clap::Parser;

use idobata_client::run_client;
use idobata_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "WebSocket chat client that sends one message and logs the rest", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// User name attached to the startup message
    #[arg(long, default_value = "Diego")]
    user: String,

    /// Text of the startup message
    #[arg(short = 'm', long, default_value = "Hello World")]
    message: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(&args.url, &args.user, &args.message).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
