//! Shared utilities for the Idobata chat relay.
//!
//! Provides logging setup and time helpers used by both the server and
//! the client binaries.

pub mod logger;
pub mod time;
