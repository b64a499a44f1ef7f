//! Application services (use cases).
//!
//! The race service sits between the inbound adapters and the store,
//! adding defaults, validation, distance semantics and store timeouts.

pub mod race;

pub use race::{RaceService, RaceSettings};
