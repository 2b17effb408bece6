//! Jam clock and period lifecycle for the penalty box timer.
//!
//! The clock is the single gate on whether simulated time is running.
//! Seats only count down on a tick where the jam clock is running, and
//! the jam clock only runs inside an active period.
//!
//! # Design Principles
//!
//! - Time never goes negative: every decrement saturates and the jam
//!   clock clamps at zero.
//! - Jam expiry uses the same stop path as a manual stop; there is no
//!   separate expiry event.
//! - Guarded commands refuse silently and report
//!   [`CommandOutcome::Rejected`] instead of failing.

use boxtimer_types::timing::{JAM_DURATION_SEC, PERIOD_DURATION_SEC, TICK_SEC};
use boxtimer_types::{CommandOutcome, JamClockSnapshot, PeriodSnapshot};
use tracing::{debug, info, warn};

use crate::display::format_clock;

/// Result of advancing the clock by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// Whether the jam clock advanced on this tick.
    pub advanced: bool,
    /// Whether the jam ran out on this tick.
    pub jam_expired: bool,
    /// Whether time is still running after the tick.
    pub running: bool,
}

/// Jam countdown, period clock, and period/game lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    /// Remaining seconds in the current jam.
    jam_time_sec: u32,
    /// Whether a jam is running.
    jam_running: bool,
    /// Jams started in the active period.
    jam_number: u32,
    /// Current period, starting at 1.
    period_number: u32,
    /// False only between ending a period and starting the next.
    period_active: bool,
    /// Remaining seconds on the period clock.
    period_time_sec: u32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Create a clock at the start of a game: period 1 active, no jam run.
    pub const fn new() -> Self {
        Self {
            jam_time_sec: JAM_DURATION_SEC,
            jam_running: false,
            jam_number: 0,
            period_number: 1,
            period_active: true,
            period_time_sec: PERIOD_DURATION_SEC,
        }
    }

    /// Remaining seconds in the current jam.
    pub const fn jam_time_sec(&self) -> u32 {
        self.jam_time_sec
    }

    /// Whether a jam is running.
    pub const fn jam_running(&self) -> bool {
        self.jam_running
    }

    /// Jams started in the active period.
    pub const fn jam_number(&self) -> u32 {
        self.jam_number
    }

    /// Current period number.
    pub const fn period_number(&self) -> u32 {
        self.period_number
    }

    /// Whether the period is active.
    pub const fn period_active(&self) -> bool {
        self.period_active
    }

    /// Remaining seconds on the period clock.
    pub const fn period_time_sec(&self) -> u32 {
        self.period_time_sec
    }

    /// Whether simulated time is actually running.
    pub const fn is_running(&self) -> bool {
        self.jam_running && self.period_active
    }

    /// Start a jam with a full jam clock.
    ///
    /// Refused between periods. Starting while a jam runs restarts it as
    /// a new jam.
    pub fn start_jam(&mut self) -> CommandOutcome {
        if !self.period_active {
            warn!(period = self.period_number, "Jam start refused: period has ended");
            return CommandOutcome::Rejected;
        }
        self.jam_running = true;
        self.jam_number = self.jam_number.saturating_add(1);
        self.jam_time_sec = JAM_DURATION_SEC;
        info!(
            period = self.period_number,
            jam = self.jam_number,
            "Jam started"
        );
        CommandOutcome::Applied
    }

    /// Stop the jam. Idempotent.
    pub fn stop_jam(&mut self) {
        if self.jam_running {
            info!(
                period = self.period_number,
                jam = self.jam_number,
                jam_time_sec = self.jam_time_sec,
                "Jam stopped"
            );
        }
        self.jam_running = false;
    }

    /// Advance the clock by one tick.
    ///
    /// Only effective while a jam runs inside an active period. The jam
    /// clock stops itself when it reaches zero; the period clock saturates
    /// at zero without stopping anything.
    pub fn tick(&mut self) -> ClockTick {
        if !self.is_running() {
            return ClockTick {
                advanced: false,
                jam_expired: false,
                running: false,
            };
        }

        self.period_time_sec = self.period_time_sec.saturating_sub(TICK_SEC);
        self.jam_time_sec = self.jam_time_sec.saturating_sub(TICK_SEC);

        let jam_expired = self.jam_time_sec == 0;
        if jam_expired {
            debug!(jam = self.jam_number, "Jam clock ran out");
            self.stop_jam();
        }

        ClockTick {
            advanced: true,
            jam_expired,
            running: self.is_running(),
        }
    }

    /// Start the next period. Refused while a period is active.
    pub fn start_new_period(&mut self) -> CommandOutcome {
        if self.period_active {
            warn!(
                period = self.period_number,
                "New period refused: current period is still active"
            );
            return CommandOutcome::Rejected;
        }
        self.period_active = true;
        self.period_number = self.period_number.saturating_add(1);
        self.jam_number = 0;
        self.jam_time_sec = JAM_DURATION_SEC;
        self.period_time_sec = PERIOD_DURATION_SEC;
        info!(period = self.period_number, "Period started");
        CommandOutcome::Applied
    }

    /// End the current period, stopping any jam. Idempotent.
    pub fn end_period(&mut self) {
        self.stop_jam();
        if self.period_active {
            info!(
                period = self.period_number,
                jams = self.jam_number,
                "Period ended"
            );
        }
        self.period_active = false;
    }

    /// Reset to the start of a game.
    pub fn end_game(&mut self) {
        *self = Self::new();
        info!("Game clock reset");
    }

    /// Render-ready view of the jam clock.
    pub fn jam_snapshot(&self) -> JamClockSnapshot {
        JamClockSnapshot {
            jam_time_sec: self.jam_time_sec,
            jam_running: self.jam_running,
            jam_number: self.jam_number,
            display: format_clock(self.jam_time_sec),
        }
    }

    /// Render-ready view of the period lifecycle.
    pub fn period_snapshot(&self) -> PeriodSnapshot {
        PeriodSnapshot {
            period_number: self.period_number,
            period_active: self.period_active,
            period_time_sec: self.period_time_sec,
            display: format_clock(self.period_time_sec),
        }
    }
}
