//! Inline-button callback payloads.

/// Action attached to an inline keyboard button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Stats,
    SetKm,
    AddKm,
    SetLaps,
    AddLaps,
    SetRaceTime,
    Reset,
    ResetConfirm,
    Cancel,
}

impl CallbackAction {
    /// Payload carried in `callback_data`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::SetKm => "set_km",
            Self::AddKm => "add_km",
            Self::SetLaps => "set_laps",
            Self::AddLaps => "add_laps",
            Self::SetRaceTime => "set_race_time",
            Self::Reset => "reset",
            Self::ResetConfirm => "reset_confirm",
            Self::Cancel => "cancel",
        }
    }

    /// Parse a `callback_data` payload.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let action = match data {
            "stats" => Self::Stats,
            "set_km" => Self::SetKm,
            "add_km" => Self::AddKm,
            "set_laps" => Self::SetLaps,
            "add_laps" => Self::AddLaps,
            "set_race_time" => Self::SetRaceTime,
            "reset" => Self::Reset,
            "reset_confirm" => Self::ResetConfirm,
            "cancel" => Self::Cancel,
            _ => return None,
        };
        Some(action)
    }

    /// Whether only admins may trigger this action.
    #[must_use]
    pub const fn requires_admin(self) -> bool {
        !matches!(self, Self::Stats | Self::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_parse_back() {
        for action in [
            CallbackAction::Stats,
            CallbackAction::SetKm,
            CallbackAction::AddKm,
            CallbackAction::SetLaps,
            CallbackAction::AddLaps,
            CallbackAction::SetRaceTime,
            CallbackAction::Reset,
            CallbackAction::ResetConfirm,
            CallbackAction::Cancel,
        ] {
            assert_eq!(CallbackAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(CallbackAction::parse("admin_stats"), None);
    }

    #[test]
    fn viewers_may_only_read_and_cancel() {
        assert!(!CallbackAction::Stats.requires_admin());
        assert!(!CallbackAction::Cancel.requires_admin());
        assert!(CallbackAction::ResetConfirm.requires_admin());
        assert!(CallbackAction::SetRaceTime.requires_admin());
    }
}
