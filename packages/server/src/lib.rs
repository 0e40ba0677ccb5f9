//! WebSocket chat relay server.
//!
//! Accepts client connections over WebSocket, greets each new connection
//! with a welcome message, and relays `sendMessage` events to every other
//! connected client.

mod broadcast;
mod handler;
mod runner;
mod signal;
mod state;

pub mod protocol;

pub use runner::run_server;
