//! Human-readable renderings of race durations.

use chrono::TimeDelta;

fn whole_seconds(delta: TimeDelta) -> i64 {
    delta.num_seconds().max(0)
}

/// `5 h 03 min`, or `42 min` under one hour. Sub-minute precision is dropped.
#[must_use]
pub fn hours_minutes(delta: TimeDelta) -> String {
    let total = whole_seconds(delta);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours == 0 {
        format!("{minutes} min")
    } else {
        format!("{hours} h {minutes:02} min")
    }
}

/// `HH:MM:SS`; hours are not wrapped at 24.
#[must_use]
pub fn clock(delta: TimeDelta) -> String {
    let total = whole_seconds(delta);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `MM:SS` per kilometre; minutes are not wrapped at 60.
#[must_use]
pub fn pace(per_km: TimeDelta) -> String {
    let total = whole_seconds(per_km);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `2 d 3 h 4 min 5 s`, omitting the day part when zero.
#[must_use]
pub fn countdown(delta: TimeDelta) -> String {
    let total = whole_seconds(delta);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if days > 0 {
        format!("{days} d {hours} h {minutes} min {seconds} s")
    } else {
        format!("{hours} h {minutes} min {seconds} s")
    }
}
