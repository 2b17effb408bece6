//! The penalty ledger: the eight seat records and their command set.
//!
//! The [`PenaltyLedger`] owns every [`Seat`] and is the only place seats
//! are mutated. Seats are stored as named fields and addressed through an
//! exhaustive `match` on [`SeatKey`], so every key is valid by
//! construction.
//!
//! # Seat lifecycle
//!
//! ```text
//! idle -> running -> { paused <-> running } -> idle
//! ```
//!
//! A seat returns to idle through natural expiry on a tick or through
//! [`PenaltyLedger::cancel_penalty`]. Both produce the same idle shape.

use boxtimer_types::timing::{PENALTY_DURATION_SEC, TICK_SEC};
use boxtimer_types::{CommandOutcome, Position, Seat, SeatKey, Team};
use tracing::{debug, info, warn};

use crate::SeatInvariantViolation;
use crate::jammer::{self, JammerEntry};

// ---------------------------------------------------------------------------
// Bench
// ---------------------------------------------------------------------------

/// One team's four seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bench {
    jammer: Seat,
    blocker1: Seat,
    blocker2: Seat,
    blocker3: Seat,
}

impl Bench {
    const fn new() -> Self {
        Self {
            jammer: Seat::idle(),
            blocker1: Seat::idle(),
            blocker2: Seat::idle(),
            blocker3: Seat::idle(),
        }
    }

    const fn seat(&self, position: Position) -> &Seat {
        match position {
            Position::Jammer => &self.jammer,
            Position::Blocker1 => &self.blocker1,
            Position::Blocker2 => &self.blocker2,
            Position::Blocker3 => &self.blocker3,
        }
    }

    const fn seat_mut(&mut self, position: Position) -> &mut Seat {
        match position {
            Position::Jammer => &mut self.jammer,
            Position::Blocker1 => &mut self.blocker1,
            Position::Blocker2 => &mut self.blocker2,
            Position::Blocker3 => &mut self.blocker3,
        }
    }
}

// ---------------------------------------------------------------------------
// PenaltyLedger
// ---------------------------------------------------------------------------

/// All eight penalty seats and the rules for serving time in them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyLedger {
    team_a: Bench,
    team_b: Bench,
}

impl Default for PenaltyLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PenaltyLedger {
    /// Create a ledger with every seat idle and enabled.
    pub const fn new() -> Self {
        Self {
            team_a: Bench::new(),
            team_b: Bench::new(),
        }
    }

    /// Return the seat record for `key`.
    pub const fn seat(&self, key: SeatKey) -> &Seat {
        self.bench(key.team).seat(key.position)
    }

    /// Iterate over every seat with its key.
    pub fn seats(&self) -> impl Iterator<Item = (SeatKey, &Seat)> + '_ {
        SeatKey::ALL.into_iter().map(|key| (key, self.seat(key)))
    }

    /// Number of seats currently serving a penalty.
    pub fn running_count(&self) -> usize {
        self.seats().filter(|(_, seat)| seat.running).count()
    }

    const fn bench(&self, team: Team) -> &Bench {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    const fn seat_mut(&mut self, key: SeatKey) -> &mut Seat {
        let bench = match key.team {
            Team::A => &mut self.team_a,
            Team::B => &mut self.team_b,
        };
        bench.seat_mut(key.position)
    }

    /// Borrow `team`'s jammer and the opposing jammer at once.
    const fn jammers_mut(&mut self, team: Team) -> (&mut Seat, &mut Seat) {
        match team {
            Team::A => (&mut self.team_a.jammer, &mut self.team_b.jammer),
            Team::B => (&mut self.team_b.jammer, &mut self.team_a.jammer),
        }
    }

    /// Seat a skater and start their penalty.
    ///
    /// Blockers always serve a full penalty. Jammers are resolved against
    /// the opposing jammer by the rules in [`jammer`]. A disabled seat
    /// refuses the command.
    pub fn start_penalty(&mut self, key: SeatKey) -> CommandOutcome {
        if !self.seat(key).enabled {
            warn!(seat = %key, "Penalty refused: seat is disabled");
            return CommandOutcome::Rejected;
        }

        if key.is_jammer() {
            let (this, other) = self.jammers_mut(key.team);
            let entry = jammer::resolve(*this, *other);
            jammer::apply(entry, this, other);
            let time_left_sec = this.time_left_sec;
            match entry {
                JammerEntry::Swap { serve_sec } => info!(
                    seat = %key,
                    released = %SeatKey::jammer(key.team.opponent()),
                    serve_sec,
                    "Jammer swap: opposing jammer released"
                ),
                JammerEntry::SimultaneousSit => info!(
                    seat = %key,
                    time_left_sec,
                    "Both jammers sat together, reduced penalty"
                ),
                JammerEntry::AbaReentry => info!(
                    seat = %key,
                    "Jammer re-entered a time-locked swap, both serving"
                ),
                JammerEntry::NoSwap => debug!(seat = %key, time_left_sec, "Jammer seated"),
            }
        } else {
            let seat = self.seat_mut(key);
            seat.running = true;
            seat.paused = false;
            seat.time_left_sec = PENALTY_DURATION_SEC;
            debug!(seat = %key, "Blocker seated");
        }

        self.debug_check();
        CommandOutcome::Applied
    }

    /// Clear a seat back to the idle shape. Always legal.
    pub fn cancel_penalty(&mut self, key: SeatKey) {
        clear(self.seat_mut(key));
        debug!(seat = %key, "Penalty cancelled");
        self.debug_check();
    }

    /// Add `delta_sec` to a running seat's remaining time.
    ///
    /// A result at or below zero is clamped to one second so the seat
    /// stays visibly serving until the next tick releases it. Refused on
    /// a seat that is not running.
    pub fn adjust_time(&mut self, key: SeatKey, delta_sec: i32) -> CommandOutcome {
        let seat = self.seat_mut(key);
        if !seat.running {
            warn!(seat = %key, delta_sec, "Adjustment refused: seat is not running");
            return CommandOutcome::Rejected;
        }

        let adjusted = i64::from(seat.time_left_sec).saturating_add(i64::from(delta_sec));
        seat.time_left_sec = if adjusted <= 0 {
            1
        } else {
            u32::try_from(adjusted).unwrap_or(u32::MAX)
        };
        debug!(seat = %key, delta_sec, time_left_sec = seat.time_left_sec, "Penalty time adjusted");

        self.debug_check();
        CommandOutcome::Applied
    }

    /// Pause or resume a running seat. Refused on a seat that is not running.
    pub fn toggle_pause(&mut self, key: SeatKey) -> CommandOutcome {
        let seat = self.seat_mut(key);
        if !seat.running {
            warn!(seat = %key, "Pause refused: seat is not running");
            return CommandOutcome::Rejected;
        }
        seat.paused = !seat.paused;
        debug!(seat = %key, paused = seat.paused, "Pause toggled");

        self.debug_check();
        CommandOutcome::Applied
    }

    /// Enable or disable a seat. Disabling clears any running penalty.
    pub fn set_enabled(&mut self, key: SeatKey, enabled: bool) {
        let seat = self.seat_mut(key);
        if !enabled && seat.running {
            clear(seat);
            info!(seat = %key, "Running penalty cleared by disabling seat");
        }
        seat.enabled = enabled;
        debug!(seat = %key, enabled, "Seat enablement changed");
        self.debug_check();
    }

    /// Advance one seat by a tick.
    ///
    /// Only a running, unpaused seat counts down, and only while the jam
    /// clock is running. When the countdown reaches zero the seat returns
    /// to the idle shape. Returns whether the penalty expired on this tick.
    pub fn tick_seat(&mut self, key: SeatKey, clock_running: bool) -> bool {
        let seat = self.seat_mut(key);
        if !(clock_running && seat.is_counting()) {
            return false;
        }

        seat.time_left_sec = seat.time_left_sec.saturating_sub(TICK_SEC);
        if seat.time_left_sec > 0 {
            return false;
        }

        clear(seat);
        info!(seat = %key, "Penalty served");
        true
    }

    /// Advance every seat by a tick. Returns the seats that expired.
    pub fn tick_all(&mut self, clock_running: bool) -> Vec<SeatKey> {
        let expired: Vec<SeatKey> = SeatKey::ALL
            .into_iter()
            .filter(|&key| self.tick_seat(key, clock_running))
            .collect();
        self.debug_check();
        expired
    }

    /// Cancel every seat. Enablement is preserved.
    pub fn reset_all(&mut self) {
        for key in SeatKey::ALL {
            clear(self.seat_mut(key));
        }
        debug!("All seats reset");
    }

    /// Return every seat to its start-of-game shape: cancelled and
    /// enabled.
    pub fn restore_defaults(&mut self) {
        self.reset_all();
        for key in SeatKey::ALL {
            self.seat_mut(key).enabled = true;
        }
        debug!("All seats restored to defaults");
    }

    /// Check every seat against the ledger's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`SeatInvariantViolation`] found.
    pub fn verify_invariants(&self) -> Result<(), SeatInvariantViolation> {
        self.seats()
            .try_for_each(|(key, seat)| crate::check_seat(key, *seat))
    }

    fn debug_check(&self) {
        debug_assert!(
            self.verify_invariants().is_ok(),
            "seat invariant violated: {:?}",
            self.verify_invariants()
        );
    }
}

/// Reset a seat to the idle shape, keeping its enabled flag.
const fn clear(seat: &mut Seat) {
    seat.running = false;
    seat.paused = false;
    seat.time_left_sec = PENALTY_DURATION_SEC;
    seat.time_locked = false;
}
