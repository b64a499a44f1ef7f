//! Handler for the `status` command.

use chrono::Utc;
use serde_json::{json, Value};

use super::output;
use crate::domain::calculator::{RaceSnapshot, Remaining};
use crate::domain::display::{local_datetime, progress_bar};
use crate::domain::duration;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_tracker;
use crate::infrastructure::config::settings::Config;

/// Read the store and print the derived view.
///
/// # Errors
/// Returns an error if the store cannot be built or read.
pub async fn execute(config: &Config) -> Result<()> {
    let tracker = build_tracker(config)?;
    let snapshot = tracker.snapshot(Utc::now()).await?;

    if output::is_json() {
        let payload = json!({
            "command": "status",
            "store": tracker.store_name(),
            "view": view_json(&snapshot),
        });
        println!("{payload}");
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    let RaceSnapshot {
        record,
        window,
        view,
    } = &snapshot;
    let offset = config.race.display_offset()?;
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Store", tracker.store_name());
    output::field("Race start", local_datetime(&window.start(), offset));
    output::field("Race end", local_datetime(&window.end(), offset));
    output::field("Phase", output::highlight(view.phase.as_str()));

    output::section("Distance");
    output::field("Total", format!("{:.2} km", view.total_km));
    output::field("Laps", view.total_laps);
    output::field("Rank", view.rank.map_or("-", |rank| rank.label()));
    if let Some(next) = view.next_rank {
        output::field(
            "Next rank",
            format!("{} in {:.1} km", next.label(), view.km_to_next_rank),
        );
    }
    output::field(
        "Progress",
        format!("{} {:.0}%", progress_bar(view.progress_percent), view.progress_percent),
    );

    output::section("Clock");
    output::field("Elapsed", duration::hours_minutes(view.elapsed));
    match view.remaining {
        Remaining::NotStarted => {
            output::field("Starts in", duration::countdown(view.countdown_to_start));
        }
        Remaining::Running(left) => output::field("Remaining", duration::clock(left)),
        Remaining::Finished => output::success("Race finished"),
    }
    output::field(
        "Direction",
        format!("{} (lap {})", view.lap_direction.as_str(), view.lap_number),
    );
    if let Some(pace) = view.pace_per_km {
        output::field("Pace", format!("{} /km", duration::pace(pace)));
        output::field("Forecast", format!("{:.1} km", view.forecast_24h_km));
    }
    output::field(
        "Updated",
        output::muted(local_datetime(&record.updated_at(), offset)),
    );
    Ok(())
}

fn view_json(snapshot: &RaceSnapshot) -> Value {
    let RaceSnapshot {
        record,
        window,
        view,
    } = snapshot;
    let remaining_seconds = match view.remaining {
        Remaining::Running(left) => Some(left.num_seconds()),
        Remaining::NotStarted | Remaining::Finished => None,
    };
    json!({
        "phase": view.phase.as_str(),
        "total_km": view.total_km,
        "total_laps": view.total_laps,
        "rank": view.rank.map(|rank| rank.label()),
        "next_rank": view.next_rank.map(|rank| rank.label()),
        "km_to_next_rank": view.km_to_next_rank,
        "progress_percent": view.progress_percent,
        "elapsed_seconds": view.elapsed.num_seconds(),
        "remaining_seconds": remaining_seconds,
        "countdown_seconds": view.countdown_to_start.num_seconds(),
        "lap_number": view.lap_number,
        "lap_direction": view.lap_direction.as_str(),
        "average_pace_kmh": view.average_pace_kmh,
        "forecast_24h_km": view.forecast_24h_km,
        "race_start": window.race_start().as_str(),
        "race_end": window.race_end().as_str(),
        "updated_at": record.updated_at(),
        "computed_at": view.computed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    use crate::domain::race::{RaceRecord, RaceWindow};

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn view_json_reports_running_race() {
        let window = RaceWindow::parse(
            Some("2025-10-04T10:00:00+03:00"),
            Some("2025-10-05T10:00:00+03:00"),
            at("2025-10-01T00:00:00Z"),
        )
        .unwrap();
        let record = RaceRecord::new(50.0, at("2025-10-04T16:00:00Z")).unwrap();
        let snapshot = RaceSnapshot::at(record, window, at("2025-10-04T17:00:00Z"));

        let body = view_json(&snapshot);
        assert_eq!(body["phase"], "in_progress");
        assert_eq!(body["total_km"], 50.0);
        assert_eq!(body["lap_number"], 126);
        assert_eq!(body["elapsed_seconds"], 10 * 3600);
        assert_eq!(body["remaining_seconds"], 14 * 3600);
        assert_eq!(body["rank"], Value::Null);
        assert_eq!(body["next_rank"], "3rd");
        assert_eq!(body["race_start"], "2025-10-04T10:00:00+03:00");
        assert_eq!(body["updated_at"], "2025-10-04T16:00:00Z");
    }
}
