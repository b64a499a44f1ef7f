//! Telegram bot configuration.

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// User ids allowed to change the race state. Empty means everyone.
    /// `ADMIN_IDS` (comma separated) overrides it.
    #[serde(default)]
    pub admin_ids: Vec<u64>,
    /// Mini-app URL for the "Open tracker" button. Falls back to
    /// `server.public_url`.
    #[serde(default)]
    pub web_app_url: Option<String>,
    /// Skip updates that queued up while the bot was offline.
    #[serde(default = "default_true")]
    pub drop_pending_updates: bool,
    /// Bot token, loaded from `TELEGRAM_BOT_TOKEN` only.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            admin_ids: Vec::new(),
            web_app_url: None,
            drop_pending_updates: default_true(),
            token: None,
        }
    }
}
