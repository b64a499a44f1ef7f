//! Telegram bot: menus, admin prompts and the race statistics message.
//!
//! The command and callback logic in [`control`] is plain async code over
//! [`RaceTracker`](crate::port::inbound::race::RaceTracker). Only
//! [`runner`] talks to Telegram and needs the `telegram` feature.

pub mod auth;
pub mod callback;
pub mod command;
pub mod control;
pub mod format;
pub mod input;
pub mod keyboard;
#[cfg(feature = "telegram")]
pub mod runner;
pub mod session;

pub use auth::AdminList;
pub use control::{BotControl, Reply, Sender};
pub use input::TimeInputRules;
