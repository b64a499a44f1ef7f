use chrono::Utc;
use tracing::info;

use super::super::input::{parse_number, RACE_TIME_FORMAT};
use super::super::keyboard::Keyboard;
use super::super::session::PendingAction;
use super::{BotControl, Reply, Sender};
use crate::domain::race::{laps_to_km, validate_laps};
use crate::domain::Timestamp;
use crate::error::Result;

impl BotControl {
    /// Read `text` as the answer to `action`.
    ///
    /// The pending action is cleared only on success, so a typo gets a
    /// correction prompt instead of dropping the admin out of the flow.
    pub(super) async fn apply_pending(
        &self,
        sender: Sender,
        action: PendingAction,
        text: &str,
    ) -> Reply {
        if !self.admins.authorize(sender.user_id, action.as_str()) {
            self.sessions.clear(sender.chat_id);
            return self.denied_reply();
        }

        match self.execute(action, text).await {
            Ok(done) => {
                self.sessions.clear(sender.chat_id);
                info!(
                    chat_id = sender.chat_id,
                    user_id = sender.user_id,
                    action = action.as_str(),
                    "Admin update applied"
                );
                Reply::with_keyboard(done, self.menu_for(sender.user_id))
            }
            Err(err) => {
                let mut reply = self.error_reply(&err);
                reply.text.push_str("\n\n");
                reply.text.push_str(&self.prompt_text(action));
                reply.keyboard = Some(Keyboard::cancel());
                reply
            }
        }
    }

    async fn execute(&self, action: PendingAction, text: &str) -> Result<String> {
        match action {
            PendingAction::SetKm => {
                let km = parse_number(text)?;
                let record = self.tracker.set_total_km(km).await?;
                Ok(format!("✅ Distance set to {:.2} km", record.total_km()))
            }
            PendingAction::AddKm => {
                let km = parse_number(text)?;
                let record = self.tracker.increment_km(km).await?;
                Ok(format!(
                    "✅ Added {km:.2} km\nTotal: {:.2} km",
                    record.total_km()
                ))
            }
            PendingAction::SetLaps => {
                let laps = validate_laps(parse_number(text)?, true)?;
                let record = self.tracker.set_laps(laps).await?;
                Ok(format!(
                    "✅ Set to {laps} laps\nTotal: {:.2} km",
                    record.total_km()
                ))
            }
            PendingAction::AddLaps => {
                let laps = validate_laps(parse_number(text)?, false)?;
                let record = self.tracker.add_laps(laps).await?;
                Ok(format!(
                    "✅ Added {laps} laps ({:.2} km)\nTotal: {:.2} km",
                    laps_to_km(laps),
                    record.total_km()
                ))
            }
            PendingAction::SetRaceTime => {
                let start = self.rules.parse_race_start(text, Utc::now())?;
                let end = start + self.rules.race_duration;
                self.tracker
                    .set_window(Timestamp::from_datetime(start), Timestamp::from_datetime(end))
                    .await?;
                Ok(format!(
                    "✅ Race start set to {}\nFinish: {}",
                    start.format(RACE_TIME_FORMAT),
                    end.format(RACE_TIME_FORMAT)
                ))
            }
        }
    }
}
