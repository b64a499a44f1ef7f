//! Rank ladder awarded at cumulative distance thresholds.

use serde::{Serialize, Serializer};

/// A classification earned by covering a threshold distance.
///
/// Variants are ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Third,
    Second,
    First,
    Master,
}

/// All ranks in ascending threshold order.
pub const RANK_LADDER: [Rank; 4] = [Rank::Third, Rank::Second, Rank::First, Rank::Master];

impl Rank {
    /// Distance needed to hold this rank.
    #[must_use]
    pub const fn threshold_km(self) -> f64 {
        match self {
            Self::Third => 160.0,
            Self::Second => 180.0,
            Self::First => 200.0,
            Self::Master => 220.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Third => "3rd",
            Self::Second => "2nd",
            Self::First => "1st",
            Self::Master => "Master",
        }
    }

    /// Highest rank whose threshold is at or below `total_km`.
    #[must_use]
    pub fn for_distance(total_km: f64) -> Option<Self> {
        RANK_LADDER
            .iter()
            .rev()
            .copied()
            .find(|rank| total_km >= rank.threshold_km())
    }

    /// First rank whose threshold lies strictly above `total_km`.
    #[must_use]
    pub fn next_after(total_km: f64) -> Option<Self> {
        RANK_LADDER
            .iter()
            .copied()
            .find(|rank| rank.threshold_km() > total_km)
    }

    /// The top of the ladder.
    #[must_use]
    pub const fn top() -> Self {
        Self::Master
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
