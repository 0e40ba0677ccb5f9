//! WebSocket chat client library.
//!
//! Connects to the relay server, sends one startup message, and logs
//! every message relayed back by the server. No prompt, no input
//! handling: a console-driven smoke test of the transport.

mod error;
mod formatter;
mod session;

pub use error::ClientError;
pub use session::run_client;
