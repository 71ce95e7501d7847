//! Tag events, outcomes, and the game context that gates tagging.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game quarter, including overtime.
///
/// Ordered in game order so aggregate tables sort Q1 before OT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// First quarter
    Q1,
    /// Second quarter
    Q2,
    /// Third quarter
    Q3,
    /// Fourth quarter
    Q4,
    /// Overtime
    OT,
}

impl Quarter {
    /// All quarters in selection order.
    pub const ALL: [Self; 5] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4, Self::OT];
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::OT => "OT",
        };
        write!(f, "{s}")
    }
}

/// Categorical outcome of a tagged possession.
///
/// Ordering groups made shots before missed shots before fouls, which is the
/// display order of the count tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShotResult {
    /// Made two-point attempt
    Made2,
    /// Made three-point attempt
    Made3,
    /// Missed two-point attempt
    Missed2,
    /// Missed three-point attempt
    Missed3,
    /// Foul drawn or committed (not a shooting attempt)
    Foul,
}

impl ShotResult {
    /// All outcomes in picker order.
    pub const ALL: [Self; 5] = [
        Self::Made2,
        Self::Made3,
        Self::Missed2,
        Self::Missed3,
        Self::Foul,
    ];

    /// Whether this outcome counts as a made attempt.
    #[must_use]
    pub const fn is_made(self) -> bool {
        matches!(self, Self::Made2 | Self::Made3)
    }

    /// Whether this outcome counts as a missed attempt.
    #[must_use]
    pub const fn is_missed(self) -> bool {
        matches!(self, Self::Missed2 | Self::Missed3)
    }

    /// Whether this outcome is a foul. Fouls are excluded from shooting
    /// attempts entirely.
    #[must_use]
    pub const fn is_foul(self) -> bool {
        matches!(self, Self::Foul)
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Made2 => "Made 2",
            Self::Made3 => "Made 3",
            Self::Missed2 => "Missed 2",
            Self::Missed3 => "Missed 3",
            Self::Foul => "Foul",
        };
        write!(f, "{s}")
    }
}

/// The (opponent, date, quarter) triple that must be filled in before any
/// tagging is permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameContext {
    /// Opponent team name (raw user input; trimmed when stamped onto events)
    pub opponent: String,
    /// Date the game is being played
    pub game_date: Option<NaiveDate>,
    /// Quarter currently being tagged
    pub quarter: Option<Quarter>,
}

impl GameContext {
    /// True iff all three required fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.opponent.trim().is_empty() && self.game_date.is_some() && self.quarter.is_some()
    }
}

/// One recorded occurrence of a labeled action with an outcome, context
/// snapshot, and timestamp.
///
/// Events deliberately carry a plain label string rather than a reference to
/// a live button: historical events must survive registry edits and reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEvent {
    /// Opponent name, trimmed at append time
    pub opponent: String,
    /// Game date from the context snapshot
    pub game_date: NaiveDate,
    /// Quarter from the context snapshot
    pub quarter: Quarter,
    /// Local wall-clock time at append, second resolution (ISO 8601)
    pub timestamp_iso: String,
    /// Label of the activated button
    pub label: String,
    /// Chosen outcome
    pub result: ShotResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_display() {
        assert_eq!(Quarter::Q1.to_string(), "Q1");
        assert_eq!(Quarter::OT.to_string(), "OT");
    }

    #[test]
    fn test_quarter_game_order() {
        assert!(Quarter::Q1 < Quarter::Q2);
        assert!(Quarter::Q4 < Quarter::OT);
    }

    #[test]
    fn test_result_display() {
        assert_eq!(ShotResult::Made2.to_string(), "Made 2");
        assert_eq!(ShotResult::Missed3.to_string(), "Missed 3");
        assert_eq!(ShotResult::Foul.to_string(), "Foul");
    }

    #[test]
    fn test_result_categories() {
        assert!(ShotResult::Made2.is_made());
        assert!(ShotResult::Made3.is_made());
        assert!(ShotResult::Missed2.is_missed());
        assert!(ShotResult::Missed3.is_missed());
        assert!(ShotResult::Foul.is_foul());

        assert!(!ShotResult::Foul.is_made());
        assert!(!ShotResult::Foul.is_missed());
        assert!(!ShotResult::Made3.is_missed());
    }

    #[test]
    fn test_context_completeness() {
        let mut ctx = GameContext::default();
        assert!(!ctx.is_complete());

        ctx.opponent = "Acadia".to_string();
        assert!(!ctx.is_complete());

        ctx.game_date = NaiveDate::from_ymd_opt(2026, 1, 17);
        assert!(!ctx.is_complete());

        ctx.quarter = Some(Quarter::Q1);
        assert!(ctx.is_complete());
    }

    #[test]
    fn test_whitespace_opponent_is_incomplete() {
        let ctx = GameContext {
            opponent: "   ".to_string(),
            game_date: NaiveDate::from_ymd_opt(2026, 1, 17),
            quarter: Some(Quarter::Q2),
        };
        assert!(!ctx.is_complete());
    }
}
