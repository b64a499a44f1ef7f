//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`]: drivers of the race service (HTTP API, Telegram bot, CLI)
//! - [`outbound`]: race store backends

pub mod inbound;
pub mod outbound;
