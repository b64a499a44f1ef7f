use chrono::Utc;
use tracing::{error, info};

use super::super::format::stats_message;
use super::super::session::PendingAction;
use super::{BotControl, Reply, Sender};
use crate::error::{Error, ErrorKind, Result};

const DENIED_TEXT: &str = "⛔ This action is only available to race administrators.";
const SERVER_ERROR_TEXT: &str = "⚠️ Server error, please try again later.";

impl BotControl {
    pub(super) fn prompt_text(&self, action: PendingAction) -> String {
        match action {
            PendingAction::SetKm => "📝 Enter the total distance in km (e.g. 42.5):".to_string(),
            PendingAction::AddKm => "➕ Enter the kilometres to add (e.g. 1.2):".to_string(),
            PendingAction::SetLaps => "🔄 Enter the total number of laps:".to_string(),
            PendingAction::AddLaps => "➕ Enter the number of laps to add:".to_string(),
            PendingAction::SetRaceTime => format!(
                "🕐 Enter the race start as DD.MM.YYYY HH:MM (UTC{}).\nThe race lasts {} h.",
                self.offset(),
                self.rules.race_duration.num_hours()
            ),
        }
    }

    pub(super) async fn stats_reply(&self, user_id: u64) -> Reply {
        match self.stats_text().await {
            Ok(text) => Reply::with_keyboard(text, self.menu_for(user_id)),
            Err(err) => self.error_reply(&err),
        }
    }

    async fn stats_text(&self) -> Result<String> {
        let snapshot = self.tracker.snapshot(Utc::now()).await?;
        Ok(stats_message(&snapshot, self.offset()))
    }

    pub(super) async fn reset_reply(&self, sender: Sender) -> Reply {
        self.sessions.clear(sender.chat_id);
        match self.tracker.reset().await {
            Ok(_) => {
                info!(user_id = sender.user_id, "Distance reset from bot");
                Reply::with_keyboard("🔄 Distance reset to 0 km", self.menu_for(sender.user_id))
            }
            Err(err) => self.error_reply(&err),
        }
    }

    pub(super) fn denied_reply(&self) -> Reply {
        Reply::text(DENIED_TEXT)
    }

    /// User-facing text for a failed request.
    pub(super) fn error_reply(&self, err: &Error) -> Reply {
        match err.kind() {
            ErrorKind::Validation => Reply::text(format!("❌ {err}")),
            ErrorKind::PermissionDenied => self.denied_reply(),
            ErrorKind::StoreUnavailable | ErrorKind::Internal => {
                error!(error = %err, "Bot request failed");
                Reply::text(SERVER_ERROR_TEXT)
            }
        }
    }
}
