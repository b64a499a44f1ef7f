//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`race`]: race use cases shared by the HTTP API, the Telegram bot and the CLI

pub mod race;
