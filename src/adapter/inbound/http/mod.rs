//! JSON HTTP API and the embedded web mini-app.
//!
//! Stateless request/response handlers over a shared [`RaceTracker`]. Every
//! response carries `Access-Control-Allow-Origin: *`.
//!
//! [`RaceTracker`]: crate::port::inbound::race::RaceTracker

mod asset;
pub mod dto;
mod error;
mod handler;
mod router;
mod server;

pub use error::ApiError;
pub use router::{router, AppState};
pub use server::serve;
