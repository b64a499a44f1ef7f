//! Telegram command parsing.

/// Supported Telegram commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Admin,
    Stats,
    Cancel,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
///
/// Accepts the `/command@botname` form used in group chats. Arguments
/// after the command are ignored.
pub fn parse_command(text: &str) -> Result<BotCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(BotCommand::Start),
        "/help" => Ok(BotCommand::Help),
        "/admin" => Ok(BotCommand::Admin),
        "/stats" => Ok(BotCommand::Stats),
        "/cancel" => Ok(BotCommand::Cancel),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /start - 🏃 Main menu\n\
    /stats - 📈 Race statistics\n\
    /admin - 🔧 Admin panel\n\
    /cancel - ❌ Cancel the current input\n\
    /help - 📋 This message"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Main menu"),
        ("stats", "Race statistics"),
        ("admin", "Admin panel"),
        ("cancel", "Cancel the current input"),
        ("help", "Show all commands"),
    ]
}
