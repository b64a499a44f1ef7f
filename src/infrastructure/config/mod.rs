//! Infrastructure configuration modules.

pub mod logging;
pub mod race;
pub mod server;
pub mod settings;
pub mod storage;
pub mod telegram;
