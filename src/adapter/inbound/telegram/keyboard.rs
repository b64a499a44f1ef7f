//! Inline keyboards, independent of the Telegram client library.

use super::callback::CallbackAction;

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    /// Sends `action` back as callback data.
    Callback {
        label: &'static str,
        action: CallbackAction,
    },
    /// Opens the web mini-app.
    WebApp { label: &'static str, url: String },
}

impl Button {
    const fn callback(label: &'static str, action: CallbackAction) -> Self {
        Self::Callback { label, action }
    }
}

/// Rows of inline buttons attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Menu for users without admin rights.
    #[must_use]
    pub fn viewer(web_app_url: Option<&str>) -> Self {
        let mut rows = vec![vec![Button::callback("📈 Stats", CallbackAction::Stats)]];
        push_web_app(&mut rows, web_app_url);
        Self { rows }
    }

    /// Admin panel.
    #[must_use]
    pub fn admin(web_app_url: Option<&str>) -> Self {
        let mut rows = vec![
            vec![
                Button::callback("✏️ Set km", CallbackAction::SetKm),
                Button::callback("➕ Add km", CallbackAction::AddKm),
            ],
            vec![
                Button::callback("✏️ Set laps", CallbackAction::SetLaps),
                Button::callback("➕ Add laps", CallbackAction::AddLaps),
            ],
            vec![
                Button::callback("⏰ Set race time", CallbackAction::SetRaceTime),
                Button::callback("🔄 Reset", CallbackAction::Reset),
            ],
            vec![Button::callback("📈 Stats", CallbackAction::Stats)],
        ];
        push_web_app(&mut rows, web_app_url);
        Self { rows }
    }

    /// Yes/no prompt before zeroing the distance.
    #[must_use]
    pub fn confirm_reset() -> Self {
        Self {
            rows: vec![vec![
                Button::callback("✅ Yes, reset", CallbackAction::ResetConfirm),
                Button::callback("❌ Cancel", CallbackAction::Cancel),
            ]],
        }
    }

    /// Single cancel button shown under input prompts.
    #[must_use]
    pub fn cancel() -> Self {
        Self {
            rows: vec![vec![Button::callback("❌ Cancel", CallbackAction::Cancel)]],
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Every callback action reachable from this keyboard.
    pub fn actions(&self) -> impl Iterator<Item = CallbackAction> + '_ {
        self.rows.iter().flatten().filter_map(|button| match button {
            Button::Callback { action, .. } => Some(*action),
            Button::WebApp { .. } => None,
        })
    }
}

fn push_web_app(rows: &mut Vec<Vec<Button>>, url: Option<&str>) {
    if let Some(url) = url {
        rows.push(vec![Button::WebApp {
            label: "🌐 Open tracker",
            url: url.to_string(),
        }]);
    }
}
