//! Per-chat pending input.

use std::collections::HashMap;

use parking_lot::Mutex;

/// What the next plain-text message in a chat will be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Absolute distance in km.
    SetKm,
    /// Kilometres to add.
    AddKm,
    /// Absolute distance in laps.
    SetLaps,
    /// Laps to add.
    AddLaps,
    /// Race start as `DD.MM.YYYY HH:MM`.
    SetRaceTime,
}

impl PendingAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetKm => "set_km",
            Self::AddKm => "add_km",
            Self::SetLaps => "set_laps",
            Self::AddLaps => "add_laps",
            Self::SetRaceTime => "set_race_time",
        }
    }
}

/// At most one pending action per chat.
#[derive(Debug, Default)]
pub struct Sessions {
    pending: Mutex<HashMap<i64, PendingAction>>,
}

impl Sessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for input, replacing any earlier prompt.
    pub fn begin(&self, chat_id: i64, action: PendingAction) {
        self.pending.lock().insert(chat_id, action);
    }

    /// The action waiting in this chat, if any.
    #[must_use]
    pub fn pending(&self, chat_id: i64) -> Option<PendingAction> {
        self.pending.lock().get(&chat_id).copied()
    }

    /// Drop the pending action; returns what was dropped.
    pub fn clear(&self, chat_id: i64) -> Option<PendingAction> {
        self.pending.lock().remove(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prompt_overwrites_old() {
        let sessions = Sessions::new();
        sessions.begin(1, PendingAction::SetKm);
        sessions.begin(1, PendingAction::AddLaps);
        assert_eq!(sessions.pending(1), Some(PendingAction::AddLaps));
    }

    #[test]
    fn chats_are_independent() {
        let sessions = Sessions::new();
        sessions.begin(1, PendingAction::SetKm);
        assert_eq!(sessions.pending(2), None);
        assert_eq!(sessions.clear(1), Some(PendingAction::SetKm));
        assert_eq!(sessions.pending(1), None);
        assert_eq!(sessions.clear(1), None);
    }
}
