//! Race domain: stored records, validation, and the pure view derivation.

pub mod calculator;
pub mod display;
pub mod duration;
pub mod error;
pub mod race;
pub mod rank;
pub mod timestamp;

pub use calculator::{LapDirection, RacePhase, RaceSnapshot, RaceView, Remaining};
pub use error::ValidationError;
pub use race::{RaceRecord, RaceWindow, LAP_LENGTH_KM};
pub use rank::Rank;
pub use timestamp::Timestamp;
