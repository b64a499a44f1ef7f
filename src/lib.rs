//! Ultratrack - distance tracking for 24-hour races.
//!
//! One shared race record (total kilometres plus the race window) is edited
//! by admins through a Telegram bot or a JSON API and read by everyone
//! through the bot, the API and an embedded web mini-app.
//!
//! # Architecture
//!
//! - **`domain`** - Race record and window types, validation, ranks and the
//!   pure [`RaceView`](domain::RaceView) derivation (elapsed, remaining,
//!   pace, forecast, lap direction)
//! - **`port`** - The [`RaceTracker`](port::RaceTracker) use-case trait and
//!   the [`RaceStore`](port::RaceStore) persistence trait
//! - **`application`** - [`RaceService`](application::RaceService), the
//!   tracker over any store with default seeding and store timeouts
//! - **`adapter`** - HTTP API (axum), Telegram bot (teloxide), CLI, and the
//!   SQLite, in-memory and remote stores
//! - **`infrastructure`** - Configuration loading and runtime wiring
//!
//! # Features
//!
//! - `telegram` (default) - Enable the Telegram bot runner
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ultratrack::domain::{RaceRecord, RaceView, RaceWindow};
//!
//! let record = RaceRecord::new(42.0, Utc::now()).unwrap();
//! let window = RaceWindow::parse(
//!     Some("2025-10-04T10:00:00+03:00"),
//!     Some("2025-10-05T10:00:00+03:00"),
//!     Utc::now(),
//! )
//! .unwrap();
//! let view = RaceView::from_state(&record, &window, Utc::now());
//! assert_eq!(view.total_laps, 105);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
