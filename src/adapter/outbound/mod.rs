//! Outbound adapters (driven side): race store backends.

pub mod memory;
pub mod remote;
pub mod sqlite;
