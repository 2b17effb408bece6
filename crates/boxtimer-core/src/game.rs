//! The game aggregate: clock and ledger behind one command surface.
//!
//! [`GameState`] owns the [`GameClock`] and the [`PenaltyLedger`]. A tick
//! advances the clock first and hands its post-tick running flag to the
//! ledger explicitly; seats never read clock state on their own.

use boxtimer_ledger::{PenaltyLedger, SeatInvariantViolation};
use boxtimer_types::timing::ADJUST_STEP_SEC;
use boxtimer_types::{Command, CommandOutcome, GameSnapshot, SeatKey};
use tracing::{debug, info};

use crate::clock::GameClock;
use crate::display::seat_snapshot;

/// A state that breaks one of the timing invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A seat record is inconsistent.
    #[error("seat invariant violated: {source}")]
    Seat {
        /// The underlying seat violation.
        #[from]
        source: SeatInvariantViolation,
    },

    /// A jam is running outside an active period.
    #[error("jam {jam} is running while period {period} is not active")]
    JamOutsidePeriod {
        /// Current jam number.
        jam: u32,
        /// Current period number.
        period: u32,
    },
}

/// Summary of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Whether simulated time advanced on this tick.
    pub clock_advanced: bool,
    /// Whether the jam ran out on this tick.
    pub jam_expired: bool,
    /// Seats whose penalty was served in full on this tick.
    pub expired_seats: Vec<SeatKey>,
}

/// The whole timing state of one scrimmage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    /// Jam clock and period lifecycle.
    clock: GameClock,
    /// The eight penalty seats.
    ledger: PenaltyLedger,
}

impl GameState {
    /// Create the start-of-game state: all seats idle, period 1 active.
    pub const fn new() -> Self {
        Self {
            clock: GameClock::new(),
            ledger: PenaltyLedger::new(),
        }
    }

    /// The clock and lifecycle.
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The penalty seats.
    pub const fn ledger(&self) -> &PenaltyLedger {
        &self.ledger
    }

    // --- Penalty commands ---

    /// Seat a skater. See [`PenaltyLedger::start_penalty`].
    pub fn start_penalty(&mut self, key: SeatKey) -> CommandOutcome {
        self.ledger.start_penalty(key)
    }

    /// Clear a seat. Always applied.
    pub fn cancel_penalty(&mut self, key: SeatKey) -> CommandOutcome {
        self.ledger.cancel_penalty(key);
        CommandOutcome::Applied
    }

    /// Add `delta_sec` to a running seat. See [`PenaltyLedger::adjust_time`].
    pub fn adjust_time(&mut self, key: SeatKey, delta_sec: i32) -> CommandOutcome {
        self.ledger.adjust_time(key, delta_sec)
    }

    /// Pause or resume a running seat.
    pub fn toggle_pause(&mut self, key: SeatKey) -> CommandOutcome {
        self.ledger.toggle_pause(key)
    }

    /// Enable or disable a seat.
    pub fn set_seat_enabled(&mut self, key: SeatKey, enabled: bool) -> CommandOutcome {
        self.ledger.set_enabled(key, enabled);
        CommandOutcome::Applied
    }

    // --- Clock commands ---

    /// Start a jam. Refused between periods.
    pub fn start_jam(&mut self) -> CommandOutcome {
        self.clock.start_jam()
    }

    /// Stop the jam. Idempotent.
    pub fn stop_jam(&mut self) -> CommandOutcome {
        self.clock.stop_jam();
        CommandOutcome::Applied
    }

    /// Start the next period. Refused while a period is active.
    pub fn start_new_period(&mut self) -> CommandOutcome {
        self.clock.start_new_period()
    }

    /// End the current period. Idempotent.
    pub fn end_period(&mut self) -> CommandOutcome {
        self.clock.end_period();
        CommandOutcome::Applied
    }

    /// Reset every seat and the lifecycle to the start of a game.
    pub fn end_game(&mut self) -> CommandOutcome {
        self.clock.end_game();
        self.ledger.restore_defaults();
        info!("Game ended, all state reset");
        CommandOutcome::Applied
    }

    /// Advance simulated time by one tick.
    ///
    /// The clock advances first; seats count down only if the clock is
    /// still running after its own tick.
    pub fn tick(&mut self) -> TickSummary {
        let clock_tick = self.clock.tick();
        let expired_seats = self.ledger.tick_all(clock_tick.running);
        self.debug_check();
        TickSummary {
            clock_advanced: clock_tick.advanced,
            jam_expired: clock_tick.jam_expired,
            expired_seats,
        }
    }

    /// Apply one command.
    ///
    /// A [`Command::Tick`] is applied as a tick and reports `Applied`;
    /// use [`tick`](Self::tick) directly to get the tick summary.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let outcome = match command {
            Command::StartPenalty { seat } => self.start_penalty(seat),
            Command::CancelPenalty { seat } => self.cancel_penalty(seat),
            Command::AdjustTime { seat, delta_sec } => self.adjust_time(seat, delta_sec),
            Command::AddTime { seat } => self.adjust_time(seat, ADJUST_STEP_SEC),
            Command::SubtractTime { seat } => self.adjust_time(seat, -ADJUST_STEP_SEC),
            Command::TogglePause { seat } => self.toggle_pause(seat),
            Command::SetSeatEnabled { seat, enabled } => self.set_seat_enabled(seat, enabled),
            Command::StartJam => self.start_jam(),
            Command::StopJam => self.stop_jam(),
            Command::StartNewPeriod => self.start_new_period(),
            Command::EndPeriod => self.end_period(),
            Command::EndGame => self.end_game(),
            Command::Tick => {
                let _ = self.tick();
                CommandOutcome::Applied
            }
        };
        debug!(?command, ?outcome, "Command applied");
        self.debug_check();
        outcome
    }

    /// Build the read model for the rendering side.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seats: self
                .ledger
                .seats()
                .map(|(key, seat)| seat_snapshot(key, *seat))
                .collect(),
            jam: self.clock.jam_snapshot(),
            period: self.clock.period_snapshot(),
        }
    }

    /// Check the whole state against the timing invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        if self.clock.jam_running() && !self.clock.period_active() {
            return Err(InvariantViolation::JamOutsidePeriod {
                jam: self.clock.jam_number(),
                period: self.clock.period_number(),
            });
        }
        self.ledger.verify_invariants()?;
        Ok(())
    }

    fn debug_check(&self) {
        debug_assert!(
            self.verify_invariants().is_ok(),
            "timing invariant violated: {:?}",
            self.verify_invariants()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtimer_types::{Position, Team};

    const A_BLOCKER: SeatKey = SeatKey::new(Team::A, Position::Blocker1);

    #[test]
    fn seats_only_count_while_jam_runs() {
        let mut game = GameState::new();
        let _ = game.start_penalty(A_BLOCKER);
        let summary = game.tick();
        assert!(!summary.clock_advanced);
        assert_eq!(game.ledger().seat(A_BLOCKER).time_left_sec, 30);

        let _ = game.start_jam();
        let summary = game.tick();
        assert!(summary.clock_advanced);
        assert_eq!(game.ledger().seat(A_BLOCKER).time_left_sec, 29);
    }

    #[test]
    fn seats_do_not_count_on_the_jam_expiry_tick() {
        let mut game = GameState::new();
        let _ = game.start_jam();
        for _ in 0..119 {
            let _ = game.tick();
        }
        let _ = game.start_penalty(A_BLOCKER);
        let summary = game.tick();
        assert!(summary.jam_expired);
        assert_eq!(game.ledger().seat(A_BLOCKER).time_left_sec, 30);
    }

    #[test]
    fn add_and_subtract_use_the_adjust_step() {
        let mut game = GameState::new();
        let _ = game.apply(Command::StartPenalty { seat: A_BLOCKER });
        let _ = game.apply(Command::AddTime { seat: A_BLOCKER });
        assert_eq!(game.ledger().seat(A_BLOCKER).time_left_sec, 60);
        let _ = game.apply(Command::SubtractTime { seat: A_BLOCKER });
        let _ = game.apply(Command::SubtractTime { seat: A_BLOCKER });
        assert_eq!(game.ledger().seat(A_BLOCKER).time_left_sec, 1);
    }

    #[test]
    fn apply_reports_rejections() {
        let mut game = GameState::new();
        assert_eq!(game.apply(Command::StartNewPeriod), CommandOutcome::Rejected);
        let _ = game.apply(Command::EndPeriod);
        assert_eq!(game.apply(Command::StartJam), CommandOutcome::Rejected);
        assert_eq!(
            game.apply(Command::TogglePause { seat: A_BLOCKER }),
            CommandOutcome::Rejected
        );
    }

    #[test]
    fn apply_tick_advances_time() {
        let mut game = GameState::new();
        let _ = game.apply(Command::StartJam);
        let _ = game.apply(Command::Tick);
        assert_eq!(game.clock().jam_time_sec(), 119);
    }

    #[test]
    fn snapshot_covers_all_seats() {
        let mut game = GameState::new();
        let _ = game.start_penalty(A_BLOCKER);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.seats.len(), 8);
        assert_eq!(snapshot.jam.display, "2:00");
        assert_eq!(snapshot.period.period_number, 1);
        let seat = snapshot.seat(A_BLOCKER);
        assert!(seat.is_some_and(|s| s.seat.running));
    }

    #[test]
    fn fresh_state_is_valid() {
        assert!(GameState::new().verify_invariants().is_ok());
    }
}
