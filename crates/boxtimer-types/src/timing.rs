//! Fixed timekeeping constants.
//!
//! Scrimmage timings are scaled down from regulation play. None of these
//! are runtime-tunable; the session driver only controls wall-clock pacing.

/// Full penalty served by any skater, in seconds.
pub const PENALTY_DURATION_SEC: u32 = 30;

/// Reduced penalty when both jammers sit at the same moment, in seconds.
///
/// Scaled from the 10 of 60 seconds of WFTDA rule 7.3.2.
pub const SIMULTANEOUS_SIT_SEC: u32 = 5;

/// Length of one jam, in seconds.
pub const JAM_DURATION_SEC: u32 = 2 * 60;

/// Length of one period, in seconds.
pub const PERIOD_DURATION_SEC: u32 = 30 * 60;

/// Seconds added or removed by one step of the adjustment controls.
pub const ADJUST_STEP_SEC: i32 = 30;

/// Remaining time at or below which a seated skater should stand.
pub const STAND_WARNING_SEC: u32 = 10;

/// Remaining time at or below which a seated skater is about to be released.
pub const RELEASE_WARNING_SEC: u32 = 3;

/// Simulated seconds that elapse per driver tick.
pub const TICK_SEC: u32 = 1;
