use tracing::{debug, info};

use super::super::callback::CallbackAction;
use super::super::command::{command_help, parse_command, BotCommand, CommandParseError};
use super::super::keyboard::Keyboard;
use super::super::session::PendingAction;
use super::{BotControl, Reply, Sender};

impl BotControl {
    /// Answer a text message.
    ///
    /// Commands are always answered. Other text is read as input for the
    /// chat's pending action; without one it is ignored (`None`).
    pub async fn handle_text(&self, sender: Sender, text: &str) -> Option<Reply> {
        match parse_command(text) {
            Ok(command) => Some(self.handle_command(sender, command).await),
            Err(CommandParseError::NotACommand) => {
                let action = self.sessions.pending(sender.chat_id)?;
                Some(self.apply_pending(sender, action, text).await)
            }
            Err(err) => Some(Reply::text(format!("❌ {err}\n\n{}", command_help()))),
        }
    }

    /// Run one parsed command.
    pub async fn handle_command(&self, sender: Sender, command: BotCommand) -> Reply {
        debug!(chat_id = sender.chat_id, user_id = sender.user_id, ?command, "Bot command");
        match command {
            BotCommand::Start => Reply::with_keyboard(
                "🏃 Welcome to the 24-hour race tracker!\n\nChoose an action:",
                self.menu_for(sender.user_id),
            ),
            BotCommand::Help => {
                Reply::with_keyboard(command_help(), self.menu_for(sender.user_id))
            }
            BotCommand::Admin => {
                if self.admins.authorize(sender.user_id, "admin_panel") {
                    Reply::with_keyboard("🔧 Admin panel:", self.menu_for(sender.user_id))
                } else {
                    self.denied_reply()
                }
            }
            BotCommand::Stats => self.stats_reply(sender.user_id).await,
            BotCommand::Cancel => self.cancel_reply(sender),
        }
    }

    /// Answer an inline-button press.
    pub async fn handle_callback(&self, sender: Sender, data: &str) -> Reply {
        let Some(action) = CallbackAction::parse(data) else {
            debug!(data, "Unknown callback payload");
            return Reply::text("❓ Unknown action");
        };
        if action.requires_admin() && !self.admins.authorize(sender.user_id, action.as_str()) {
            return self.denied_reply();
        }

        match action {
            CallbackAction::Stats => self.stats_reply(sender.user_id).await,
            CallbackAction::SetKm => self.prompt(sender, PendingAction::SetKm),
            CallbackAction::AddKm => self.prompt(sender, PendingAction::AddKm),
            CallbackAction::SetLaps => self.prompt(sender, PendingAction::SetLaps),
            CallbackAction::AddLaps => self.prompt(sender, PendingAction::AddLaps),
            CallbackAction::SetRaceTime => self.prompt(sender, PendingAction::SetRaceTime),
            CallbackAction::Reset => Reply::with_keyboard(
                "⚠️ Reset the distance to zero? The race window is kept.",
                Keyboard::confirm_reset(),
            ),
            CallbackAction::ResetConfirm => self.reset_reply(sender).await,
            CallbackAction::Cancel => self.cancel_reply(sender),
        }
    }

    fn prompt(&self, sender: Sender, action: PendingAction) -> Reply {
        self.sessions.begin(sender.chat_id, action);
        info!(chat_id = sender.chat_id, action = action.as_str(), "Waiting for admin input");
        Reply::with_keyboard(self.prompt_text(action), Keyboard::cancel())
    }

    fn cancel_reply(&self, sender: Sender) -> Reply {
        let text = match self.sessions.clear(sender.chat_id) {
            Some(_) => "❌ Input cancelled",
            None => "❌ Action cancelled",
        };
        Reply::with_keyboard(text, self.menu_for(sender.user_id))
    }
}
