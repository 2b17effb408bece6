//! Commands issued by the rendering side into the timing core.
//!
//! Every user action is one [`Command`]. The wire form is an internally
//! tagged JSON object, e.g.
//! `{"command":"start_penalty","seat":{"team":"a","position":"jammer"}}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::structs::SeatKey;

/// A request to change timing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "command", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Command {
    /// Seat a skater and start their penalty.
    StartPenalty {
        /// Target seat.
        seat: SeatKey,
    },
    /// Clear a seat immediately.
    CancelPenalty {
        /// Target seat.
        seat: SeatKey,
    },
    /// Add (or with a negative value, remove) seconds on a running seat.
    AdjustTime {
        /// Target seat.
        seat: SeatKey,
        /// Seconds to add; negative removes.
        delta_sec: i32,
    },
    /// Add one adjustment step to a running seat.
    AddTime {
        /// Target seat.
        seat: SeatKey,
    },
    /// Remove one adjustment step from a running seat.
    SubtractTime {
        /// Target seat.
        seat: SeatKey,
    },
    /// Pause or resume a running seat.
    TogglePause {
        /// Target seat.
        seat: SeatKey,
    },
    /// Enable or disable a seat.
    SetSeatEnabled {
        /// Target seat.
        seat: SeatKey,
        /// New enabled flag.
        enabled: bool,
    },
    /// Start a jam.
    StartJam,
    /// Stop the running jam.
    StopJam,
    /// Start the next period after one has ended.
    StartNewPeriod,
    /// End the current period.
    EndPeriod,
    /// Reset everything to the start of a game.
    EndGame,
    /// Advance simulated time by one tick.
    Tick,
}

impl Command {
    /// The seat this command targets, if any.
    pub const fn seat(self) -> Option<SeatKey> {
        match self {
            Self::StartPenalty { seat }
            | Self::CancelPenalty { seat }
            | Self::AdjustTime { seat, .. }
            | Self::AddTime { seat }
            | Self::SubtractTime { seat }
            | Self::TogglePause { seat }
            | Self::SetSeatEnabled { seat, .. } => Some(seat),
            Self::StartJam
            | Self::StopJam
            | Self::StartNewPeriod
            | Self::EndPeriod
            | Self::EndGame
            | Self::Tick => None,
        }
    }
}
