//! Jammer swap rules.
//!
//! When a jammer sits, the opposing jammer's seat decides how much time
//! the new arrival serves. The rules follow WFTDA 7.3.x scaled to
//! scrimmage timings and are evaluated in a fixed priority order:
//!
//! 1. **No swap** -- the other jammer is not serving: full penalty.
//! 2. **Simultaneous sit** -- the other jammer has served nothing yet:
//!    both serve the reduced time (7.3.2).
//! 3. **ABA re-entry** -- either jammer is time-locked: both serve
//!    concurrently, the arrival gets a full penalty and both locks clear
//!    (7.3.1, jammerless jam).
//! 4. **Swap** -- the other jammer is released and the arrival serves
//!    the time the other had already served, at least one second, and
//!    becomes time-locked.
//!
//! Case 2 must precede case 4 (both read the other's remaining time), and
//! case 3 must precede case 4 (both read the time locks).

use boxtimer_types::Seat;
use boxtimer_types::timing::{PENALTY_DURATION_SEC, SIMULTANEOUS_SIT_SEC};

/// Which rule applied when a jammer sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JammerEntry {
    /// Opposing jammer was not serving.
    NoSwap,
    /// Both jammers sat with no time served.
    SimultaneousSit,
    /// A time-locked swap cycle was re-entered.
    AbaReentry,
    /// Opposing jammer was released early.
    Swap {
        /// Seconds the arriving jammer must serve.
        serve_sec: u32,
    },
}

/// Decide which rule applies to a jammer sitting against `other`.
pub const fn resolve(this: Seat, other: Seat) -> JammerEntry {
    if !other.running {
        JammerEntry::NoSwap
    } else if other.time_left_sec == PENALTY_DURATION_SEC {
        JammerEntry::SimultaneousSit
    } else if this.time_locked || other.time_locked {
        JammerEntry::AbaReentry
    } else {
        let served = other.served_sec();
        JammerEntry::Swap {
            serve_sec: if served == 0 { 1 } else { served },
        }
    }
}

/// Apply a resolved rule to the arriving jammer (`this`) and the opposing
/// jammer (`other`).
pub const fn apply(entry: JammerEntry, this: &mut Seat, other: &mut Seat) {
    this.running = true;
    this.paused = false;
    match entry {
        JammerEntry::NoSwap => {
            this.time_left_sec = PENALTY_DURATION_SEC;
            this.time_locked = false;
        }
        JammerEntry::SimultaneousSit => {
            this.time_left_sec = SIMULTANEOUS_SIT_SEC;
            other.time_left_sec = SIMULTANEOUS_SIT_SEC;
        }
        JammerEntry::AbaReentry => {
            this.time_left_sec = PENALTY_DURATION_SEC;
            this.time_locked = false;
            other.time_locked = false;
        }
        JammerEntry::Swap { serve_sec } => {
            other.running = false;
            other.paused = false;
            other.time_left_sec = PENALTY_DURATION_SEC;
            this.time_left_sec = serve_sec;
            this.time_locked = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serving(time_left_sec: u32) -> Seat {
        Seat {
            running: true,
            time_left_sec,
            ..Seat::idle()
        }
    }

    #[test]
    fn idle_opponent_means_no_swap() {
        let other = Seat {
            time_locked: true,
            ..Seat::idle()
        };
        assert_eq!(resolve(Seat::idle(), other), JammerEntry::NoSwap);
    }

    #[test]
    fn untouched_opponent_means_simultaneous_sit() {
        assert_eq!(
            resolve(Seat::idle(), serving(PENALTY_DURATION_SEC)),
            JammerEntry::SimultaneousSit
        );
    }

    #[test]
    fn simultaneous_sit_wins_over_time_lock() {
        let other = Seat {
            time_locked: true,
            ..serving(PENALTY_DURATION_SEC)
        };
        assert_eq!(resolve(Seat::idle(), other), JammerEntry::SimultaneousSit);
    }

    #[test]
    fn lock_on_either_side_means_reentry() {
        let locked_other = Seat {
            time_locked: true,
            ..serving(12)
        };
        assert_eq!(resolve(Seat::idle(), locked_other), JammerEntry::AbaReentry);

        let locked_this = Seat {
            time_locked: true,
            ..Seat::idle()
        };
        assert_eq!(resolve(locked_this, serving(12)), JammerEntry::AbaReentry);
    }

    #[test]
    fn swap_serves_time_already_served() {
        assert_eq!(
            resolve(Seat::idle(), serving(20)),
            JammerEntry::Swap { serve_sec: 10 }
        );
    }

    #[test]
    fn swap_never_serves_zero() {
        // Time added beyond a full penalty means nothing has been served.
        assert_eq!(
            resolve(Seat::idle(), serving(45)),
            JammerEntry::Swap { serve_sec: 1 }
        );
    }

    #[test]
    fn apply_swap_releases_other_and_locks_this() {
        let mut this = Seat::idle();
        let mut other = Seat {
            paused: true,
            ..serving(20)
        };
        let entry = resolve(this, other);
        apply(entry, &mut this, &mut other);

        assert!(this.running);
        assert_eq!(this.time_left_sec, 10);
        assert!(this.time_locked);
        assert!(!other.running);
        assert!(!other.paused);
        assert_eq!(other.time_left_sec, PENALTY_DURATION_SEC);
    }

    #[test]
    fn apply_reentry_leaves_other_running() {
        let mut this = Seat::idle();
        let mut other = Seat {
            time_locked: true,
            paused: true,
            ..serving(7)
        };
        apply(JammerEntry::AbaReentry, &mut this, &mut other);

        assert_eq!(this.time_left_sec, PENALTY_DURATION_SEC);
        assert!(!this.time_locked);
        assert!(!other.time_locked);
        assert!(other.running);
        assert!(other.paused);
        assert_eq!(other.time_left_sec, 7);
    }
}
