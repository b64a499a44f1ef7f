//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the race application and the outside
//! world. Inbound adapters (HTTP API, Telegram bot, CLI) drive the
//! application through [`inbound::race::RaceTracker`]; the application
//! persists state through [`outbound::store::RaceStore`].
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │ HTTP API │   │ Telegram │   │   CLI    │
//!   └────┬─────┘   └────┬─────┘   └────┬─────┘
//!        └──────────────┼──────────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │  RaceTracker  │  (inbound port)
//!               │  RaceService  │
//!               └───────┬───────┘
//!                       ▼
//!               ┌───────────────┐
//!               │   RaceStore   │  (outbound port)
//!               └───────┬───────┘
//!        ┌──────────────┼──────────────┐
//!        ▼              ▼              ▼
//!   ┌─────────┐    ┌─────────┐    ┌─────────┐
//!   │ SQLite  │    │ Memory  │    │ Remote  │
//!   └─────────┘    └─────────┘    └─────────┘
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::race::RaceTracker;
pub use outbound::store::RaceStore;
