//! Plain-text renderings shared by the bot and the terminal.

use chrono::{DateTime, FixedOffset, TimeZone};

const PROGRESS_CELLS: usize = 10;

/// Ten-cell bar such as `▓▓▓░░░░░░░`.
#[must_use]
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_CELLS as f64).round() as usize;
    let filled = filled.min(PROGRESS_CELLS);
    format!("{}{}", "▓".repeat(filled), "░".repeat(PROGRESS_CELLS - filled))
}

/// `DD.MM.YYYY HH:MM` in `offset`.
#[must_use]
pub fn local_datetime<Tz: TimeZone>(at: &DateTime<Tz>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%d.%m.%Y %H:%M").to_string()
}
