//! Bot command and callback handling against the race service.
//!
//! Everything here is independent of the Telegram client; the runner turns
//! a [`Reply`] into an API call.

use std::sync::Arc;

use chrono::FixedOffset;

use super::auth::AdminList;
use super::input::TimeInputRules;
use super::keyboard::Keyboard;
use super::session::Sessions;
use crate::port::inbound::race::RaceTracker;

mod dispatch;
mod mutate;
mod render;

/// Message to send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTML-formatted text.
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    #[must_use]
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Who sent an update, and where to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sender {
    pub chat_id: i64,
    pub user_id: u64,
}

/// Race bot state: the tracker, the admin list and per-chat sessions.
pub struct BotControl {
    tracker: Arc<dyn RaceTracker>,
    admins: AdminList,
    sessions: Sessions,
    rules: TimeInputRules,
    web_app_url: Option<String>,
}

impl BotControl {
    #[must_use]
    pub fn new(tracker: Arc<dyn RaceTracker>, admins: AdminList, rules: TimeInputRules) -> Self {
        Self {
            tracker,
            admins,
            sessions: Sessions::new(),
            rules,
            web_app_url: None,
        }
    }

    /// Add an "Open tracker" button to the menus.
    #[must_use]
    pub fn with_web_app_url(mut self, url: impl Into<String>) -> Self {
        self.web_app_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn admins(&self) -> &AdminList {
        &self.admins
    }

    #[must_use]
    pub const fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    fn offset(&self) -> FixedOffset {
        self.rules.offset
    }

    fn menu_for(&self, user_id: u64) -> Keyboard {
        let url = self.web_app_url.as_deref();
        if self.admins.is_admin(user_id) {
            Keyboard::admin(url)
        } else {
            Keyboard::viewer(url)
        }
    }
}
