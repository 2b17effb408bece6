//! Seat records and the snapshot read model.
//!
//! [`Seat`] is the mutable record owned by the penalty ledger. The
//! `*Snapshot` types are the plain data handed to the rendering side after
//! every command or tick.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Position, SeatState, Team, WarningLevel};
use crate::timing::PENALTY_DURATION_SEC;

// ---------------------------------------------------------------------------
// Seat key
// ---------------------------------------------------------------------------

/// Identifies one of the eight seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeatKey {
    /// Team the seat belongs to.
    pub team: Team,
    /// Position of the seat on that team's bench.
    pub position: Position,
}

impl SeatKey {
    /// Every seat, team A first, jammer first within each team.
    pub const ALL: [Self; 8] = [
        Self::new(Team::A, Position::Jammer),
        Self::new(Team::A, Position::Blocker1),
        Self::new(Team::A, Position::Blocker2),
        Self::new(Team::A, Position::Blocker3),
        Self::new(Team::B, Position::Jammer),
        Self::new(Team::B, Position::Blocker1),
        Self::new(Team::B, Position::Blocker2),
        Self::new(Team::B, Position::Blocker3),
    ];

    /// Create a seat key.
    pub const fn new(team: Team, position: Position) -> Self {
        Self { team, position }
    }

    /// Shorthand for a team's jammer seat.
    pub const fn jammer(team: Team) -> Self {
        Self::new(team, Position::Jammer)
    }

    /// Whether this key addresses a jammer seat.
    pub const fn is_jammer(self) -> bool {
        self.position.is_jammer()
    }
}

impl core::fmt::Display for SeatKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.team, self.position)
    }
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One penalty slot.
///
/// Invariants maintained by the ledger:
/// - `paused` implies `running`.
/// - `time_locked` is only ever set on jammer seats.
/// - `time_left_sec` is at least 1 while `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Seat {
    /// Currently serving a penalty.
    pub running: bool,
    /// Countdown frozen without losing progress. Only meaningful while running.
    pub paused: bool,
    /// Remaining whole seconds.
    pub time_left_sec: u32,
    /// Whether the seat participates at all.
    pub enabled: bool,
    /// Jammer only: this occupant was swapped in early and must not
    /// trigger another early release.
    pub time_locked: bool,
}

impl Seat {
    /// An empty, enabled seat.
    pub const fn idle() -> Self {
        Self {
            running: false,
            paused: false,
            time_left_sec: PENALTY_DURATION_SEC,
            enabled: true,
            time_locked: false,
        }
    }

    /// Whether the seat is empty (not serving).
    pub const fn is_idle(self) -> bool {
        !self.running
    }

    /// Whether the countdown advances on a running clock.
    pub const fn is_counting(self) -> bool {
        self.running && !self.paused
    }

    /// Seconds already served of a full penalty, saturating at zero when
    /// time was added beyond the full penalty.
    pub const fn served_sec(self) -> u32 {
        PENALTY_DURATION_SEC.saturating_sub(self.time_left_sec)
    }
}

impl Default for Seat {
    fn default() -> Self {
        Self::idle()
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Render-ready view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeatSnapshot {
    /// Which seat this is.
    pub key: SeatKey,
    /// The underlying seat record.
    pub seat: Seat,
    /// Visual state of the seat cell.
    pub state: SeatState,
    /// Countdown warning.
    pub warning: WarningLevel,
    /// Timer text (`M:SS`, `0:30` when idle, `--:--` when disabled).
    pub display: String,
}

/// Render-ready view of the jam clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct JamClockSnapshot {
    /// Remaining seconds in the current jam.
    pub jam_time_sec: u32,
    /// Whether the jam is running.
    pub jam_running: bool,
    /// Jams started in the active period.
    pub jam_number: u32,
    /// Jam clock text (`M:SS`).
    pub display: String,
}

/// Render-ready view of the period and game lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PeriodSnapshot {
    /// Current period, starting at 1.
    pub period_number: u32,
    /// False only between ending a period and starting the next.
    pub period_active: bool,
    /// Remaining seconds on the period clock.
    pub period_time_sec: u32,
    /// Period clock text (`M:SS`).
    pub display: String,
}

/// Complete read model handed to the rendering side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// All eight seats. Order carries no meaning.
    pub seats: Vec<SeatSnapshot>,
    /// Jam clock.
    pub jam: JamClockSnapshot,
    /// Period and game lifecycle.
    pub period: PeriodSnapshot,
}

impl GameSnapshot {
    /// Look up one seat in the snapshot.
    pub fn seat(&self, key: SeatKey) -> Option<&SeatSnapshot> {
        self.seats.iter().find(|s| s.key == key)
    }
}
