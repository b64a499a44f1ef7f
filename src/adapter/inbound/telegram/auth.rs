//! Admin allow-list for race-changing actions.

use std::collections::HashSet;

use tracing::warn;

/// Static set of Telegram user ids allowed to change the race state.
///
/// An empty list makes every user an admin.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    ids: HashSet<u64>,
}

impl AdminList {
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// True when no ids are configured.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check if a user may run admin actions.
    #[must_use]
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.is_open() || self.ids.contains(&user_id)
    }

    /// Like [`is_admin`](Self::is_admin), logging the refusal.
    #[must_use]
    pub fn authorize(&self, user_id: u64, action: &str) -> bool {
        if self.is_admin(user_id) {
            return true;
        }
        warn!(user_id, action, "Refusing admin action from non-admin user");
        false
    }
}
