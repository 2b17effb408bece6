//! Enumeration types for the penalty box timer.
//!
//! Teams and positions form the fixed eight-seat key space. The remaining
//! enums are read-model classifications handed to the rendering side.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Seat key space
// ---------------------------------------------------------------------------

/// One of the two teams in the scrimmage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Team {
    /// The first team.
    A,
    /// The second team.
    B,
}

impl Team {
    /// Both teams, in display order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Return the opposing team.
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A seat position within one team's side of the penalty box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Position {
    /// The jammer seat. Subject to the jammer swap rules.
    Jammer,
    /// First blocker seat.
    Blocker1,
    /// Second blocker seat.
    Blocker2,
    /// Third blocker seat.
    Blocker3,
}

impl Position {
    /// All four positions, jammer first.
    pub const ALL: [Self; 4] = [Self::Jammer, Self::Blocker1, Self::Blocker2, Self::Blocker3];

    /// Whether this is the jammer seat.
    pub const fn is_jammer(self) -> bool {
        matches!(self, Self::Jammer)
    }

    /// Lowercase name used in logs and the console grammar.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jammer => "jammer",
            Self::Blocker1 => "blocker1",
            Self::Blocker2 => "blocker2",
            Self::Blocker3 => "blocker3",
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Read-model classifications
// ---------------------------------------------------------------------------

/// Visual state of a seat cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SeatState {
    /// Seat is empty and ready for a new penalty.
    Idle,
    /// Penalty is being served and counting down.
    Running,
    /// Penalty is being served but the countdown is frozen.
    Paused,
    /// Seat does not participate.
    Disabled,
}

/// Countdown warning shown on a running seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum WarningLevel {
    /// No warning.
    None,
    /// Skater should stand up (10 seconds or less remaining).
    Stand,
    /// Skater is about to be released (3 seconds or less remaining).
    Release,
}

/// Whether a command changed state or was refused by the current state.
///
/// Refusals are policy, not failures: the command was valid but the
/// current state does not allow it (e.g. starting a jam between periods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CommandOutcome {
    /// The command was applied.
    Applied,
    /// The command was refused and state is unchanged.
    Rejected,
}

impl CommandOutcome {
    /// Whether the command was applied.
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for team in Team::ALL {
            assert_ne!(team.opponent(), team);
            assert_eq!(team.opponent().opponent(), team);
        }
    }

    #[test]
    fn only_the_jammer_is_a_jammer() {
        let jammers: Vec<Position> = Position::ALL
            .into_iter()
            .filter(|p| p.is_jammer())
            .collect();
        assert_eq!(jammers, vec![Position::Jammer]);
    }

    #[test]
    fn wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Team::B).ok().as_deref(), Some("\"b\""));
        assert_eq!(
            serde_json::to_string(&Position::Blocker2).ok().as_deref(),
            Some("\"blocker2\"")
        );
        assert_eq!(
            serde_json::to_string(&WarningLevel::Release).ok().as_deref(),
            Some("\"release\"")
        );
    }
}
