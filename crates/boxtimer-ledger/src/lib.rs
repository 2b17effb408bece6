//! Penalty seat ledger for the penalty box timer.
//!
//! The ledger owns the eight penalty seats (two teams, one jammer and
//! three blockers each) and every rule for serving time in them.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`PenaltyLedger`] struct: seat storage and the
//!   start, cancel, adjust, pause, enable, and tick commands.
//! - [`jammer`] -- The jammer swap rules applied when a jammer sits.
//!
//! # Seat invariants
//!
//! After every command, for every seat:
//!
//! ```text
//! paused       => running
//! time_locked  => position == Jammer
//! running      => time_left_sec >= 1
//! running      => enabled
//! ```
//!
//! The ledger never returns errors for commands; a violated invariant is a
//! programming error, reported by [`PenaltyLedger::verify_invariants`] and
//! asserted in debug builds.
//!
//! # Usage
//!
//! ```
//! use boxtimer_ledger::PenaltyLedger;
//! use boxtimer_types::{SeatKey, Team};
//!
//! let mut ledger = PenaltyLedger::new();
//! let a = SeatKey::jammer(Team::A);
//! let b = SeatKey::jammer(Team::B);
//!
//! ledger.start_penalty(a);
//! for _ in 0..10 {
//!     ledger.tick_all(true);
//! }
//!
//! // B sits after A served 10 seconds: A is released, B serves those 10.
//! ledger.start_penalty(b);
//! assert!(!ledger.seat(a).running);
//! assert_eq!(ledger.seat(b).time_left_sec, 10);
//! ```

pub mod jammer;
pub mod ledger;

// Re-export primary types at crate root.
pub use jammer::JammerEntry;
pub use ledger::PenaltyLedger;

use boxtimer_types::{Seat, SeatKey};

/// A seat record that breaks one of the ledger invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SeatInvariantViolation {
    /// Seat is paused without serving a penalty.
    #[error("seat {seat} is paused while not running")]
    PausedWhileIdle {
        /// The offending seat.
        seat: SeatKey,
    },

    /// A blocker seat carries the jammer-only time lock.
    #[error("blocker seat {seat} is time-locked")]
    BlockerTimeLocked {
        /// The offending seat.
        seat: SeatKey,
    },

    /// Seat is serving with no time left.
    #[error("seat {seat} is running with no time left")]
    RunningWithoutTime {
        /// The offending seat.
        seat: SeatKey,
    },

    /// A disabled seat is serving a penalty.
    #[error("disabled seat {seat} is running")]
    DisabledSeatRunning {
        /// The offending seat.
        seat: SeatKey,
    },
}

/// Check one seat record against the ledger invariants.
///
/// # Errors
///
/// Returns the first [`SeatInvariantViolation`] the record breaks.
pub const fn check_seat(seat_key: SeatKey, seat: Seat) -> Result<(), SeatInvariantViolation> {
    if seat.paused && !seat.running {
        return Err(SeatInvariantViolation::PausedWhileIdle { seat: seat_key });
    }
    if seat.time_locked && !seat_key.is_jammer() {
        return Err(SeatInvariantViolation::BlockerTimeLocked { seat: seat_key });
    }
    if seat.running && seat.time_left_sec == 0 {
        return Err(SeatInvariantViolation::RunningWithoutTime { seat: seat_key });
    }
    if seat.running && !seat.enabled {
        return Err(SeatInvariantViolation::DisabledSeatRunning { seat: seat_key });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtimer_types::{Position, Team};

    #[test]
    fn idle_seat_is_valid_everywhere() {
        for key in SeatKey::ALL {
            assert_eq!(check_seat(key, Seat::idle()), Ok(()));
        }
    }

    #[test]
    fn paused_idle_seat_is_rejected() {
        let key = SeatKey::new(Team::A, Position::Blocker1);
        let seat = Seat {
            paused: true,
            ..Seat::idle()
        };
        assert_eq!(
            check_seat(key, seat),
            Err(SeatInvariantViolation::PausedWhileIdle { seat: key })
        );
    }

    #[test]
    fn time_lock_is_jammer_only() {
        let seat = Seat {
            running: true,
            time_locked: true,
            ..Seat::idle()
        };
        assert_eq!(check_seat(SeatKey::jammer(Team::B), seat), Ok(()));

        let blocker = SeatKey::new(Team::B, Position::Blocker3);
        assert_eq!(
            check_seat(blocker, seat),
            Err(SeatInvariantViolation::BlockerTimeLocked { seat: blocker })
        );
    }

    #[test]
    fn running_seat_needs_time() {
        let key = SeatKey::jammer(Team::A);
        let seat = Seat {
            running: true,
            time_left_sec: 0,
            ..Seat::idle()
        };
        assert_eq!(
            check_seat(key, seat),
            Err(SeatInvariantViolation::RunningWithoutTime { seat: key })
        );
    }
}
