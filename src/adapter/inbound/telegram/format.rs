//! Telegram message formatting (HTML parse mode).

use chrono::FixedOffset;

use crate::domain::calculator::{RacePhase, RaceSnapshot, Remaining};
use crate::domain::display::{local_datetime, progress_bar};
use crate::domain::duration;
use crate::domain::rank::Rank;

const RULE: &str = "━━━━━━━━━━━━━━━━";

fn rank_emoji(rank: Option<Rank>) -> &'static str {
    match rank {
        None => "⚪️",
        Some(Rank::Third) => "🟢",
        Some(Rank::Second) => "🟡",
        Some(Rank::First) => "🔴",
        Some(Rank::Master) => "🟣",
    }
}

/// Full race statistics message.
#[must_use]
pub fn stats_message(snapshot: &RaceSnapshot, offset: FixedOffset) -> String {
    let RaceSnapshot {
        record,
        window,
        view,
    } = snapshot;
    let mut text = format!("📊 <b>RACE STATISTICS</b>\n{RULE}\n\n");

    text.push_str(&format!(
        "🏁 <b>Race start:</b>\n   {}\n\n",
        local_datetime(&window.start(), offset)
    ));
    text.push_str(&format!("🏃 <b>Distance:</b>\n   {:.2} km\n\n", view.total_km));
    text.push_str(&format!("🔄 <b>Laps:</b>\n   {}\n\n", view.total_laps));
    text.push_str(&format!(
        "{} <b>Rank:</b>\n   {}\n\n",
        rank_emoji(view.rank),
        view.rank.map_or("-", Rank::label)
    ));
    match view.next_rank {
        Some(next) => text.push_str(&format!(
            "🎯 <b>To next rank:</b>\n   {:.1} km (to {} at {} km)\n\n",
            view.km_to_next_rank,
            next.label(),
            next.threshold_km()
        )),
        None => text.push_str("🏆 <b>Top rank reached!</b>\n\n"),
    }

    let elapsed = match view.phase {
        RacePhase::PreStart => format!(
            "Not started (starts in {})",
            duration::countdown(view.countdown_to_start)
        ),
        RacePhase::InProgress | RacePhase::Finished => duration::hours_minutes(view.elapsed),
    };
    text.push_str(&format!("⏱ <b>Elapsed:</b>\n   {elapsed}\n\n"));
    if let Remaining::Running(left) = view.remaining {
        text.push_str(&format!(
            "⏳ <b>Remaining:</b>\n   {}\n\n",
            duration::hours_minutes(left)
        ));
    }
    if view.phase == RacePhase::Finished {
        text.push_str("🏁 <b>Race finished</b>\n\n");
    }

    text.push_str(&format!(
        "🧭 <b>Direction:</b>\n   {} (lap {})\n\n",
        view.lap_direction.as_str(),
        view.lap_number
    ));
    if let (Some(kmh), Some(per_km)) = (view.average_pace_kmh, view.pace_per_km) {
        text.push_str(&format!(
            "⚡ <b>Pace:</b>\n   {} /km ({kmh:.2} km/h)\n\n",
            duration::pace(per_km)
        ));
        text.push_str(&format!(
            "🔮 <b>24h forecast:</b>\n   {:.1} km\n\n",
            view.forecast_24h_km
        ));
    }

    text.push_str(&format!(
        "📈 <b>Progress to {}:</b>\n   {} {:.0}%\n\n",
        Rank::top().label(),
        progress_bar(view.progress_percent),
        view.progress_percent
    ));
    text.push_str(RULE);
    text.push_str(&format!(
        "\n🕐 Updated: {}",
        local_datetime(&record.updated_at(), offset)
    ));
    text
}
