//! Read-model derivation: clock text, seat states, and warning levels.
//!
//! Everything here is a pure function of the timing state. The rendering
//! side receives the results as plain data and never recomputes them.

use boxtimer_types::timing::{PENALTY_DURATION_SEC, RELEASE_WARNING_SEC, STAND_WARNING_SEC};
use boxtimer_types::{Seat, SeatKey, SeatSnapshot, SeatState, WarningLevel};

/// Timer text shown on a disabled seat.
pub const DISABLED_DISPLAY: &str = "--:--";

/// Format whole seconds as `M:SS`.
pub fn format_clock(total_sec: u32) -> String {
    let minutes = total_sec / 60;
    let seconds = total_sec % 60;
    format!("{minutes}:{seconds:02}")
}

/// Visual state of a seat cell.
pub const fn seat_state(seat: Seat) -> SeatState {
    if !seat.enabled {
        SeatState::Disabled
    } else if seat.is_idle() {
        SeatState::Idle
    } else if seat.paused {
        SeatState::Paused
    } else {
        SeatState::Running
    }
}

/// Countdown warning for a seat. Paused seats still warn.
pub const fn warning_level(seat: Seat) -> WarningLevel {
    if !seat.running || seat.time_left_sec == 0 {
        WarningLevel::None
    } else if seat.time_left_sec <= RELEASE_WARNING_SEC {
        WarningLevel::Release
    } else if seat.time_left_sec <= STAND_WARNING_SEC {
        WarningLevel::Stand
    } else {
        WarningLevel::None
    }
}

/// Timer text for a seat.
pub fn seat_display(seat: Seat) -> String {
    if !seat.enabled {
        DISABLED_DISPLAY.to_owned()
    } else if seat.running {
        format_clock(seat.time_left_sec)
    } else {
        format_clock(PENALTY_DURATION_SEC)
    }
}

/// Render-ready view of one seat.
pub fn seat_snapshot(key: SeatKey, seat: Seat) -> SeatSnapshot {
    SeatSnapshot {
        key,
        seat,
        state: seat_state(seat),
        warning: warning_level(seat),
        display: seat_display(seat),
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
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(30), "0:30");
        assert_eq!(format_clock(120), "2:00");
        assert_eq!(format_clock(1800), "30:00");
        assert_eq!(format_clock(61), "1:01");
    }

    #[test]
    fn seat_states() {
        assert_eq!(seat_state(Seat::idle()), SeatState::Idle);
        assert_eq!(seat_state(serving(12)), SeatState::Running);
        let paused = Seat {
            paused: true,
            ..serving(12)
        };
        assert_eq!(seat_state(paused), SeatState::Paused);
        let disabled = Seat {
            enabled: false,
            ..Seat::idle()
        };
        assert_eq!(seat_state(disabled), SeatState::Disabled);
    }

    #[test]
    fn warning_thresholds() {
        assert_eq!(warning_level(serving(11)), WarningLevel::None);
        assert_eq!(warning_level(serving(10)), WarningLevel::Stand);
        assert_eq!(warning_level(serving(4)), WarningLevel::Stand);
        assert_eq!(warning_level(serving(3)), WarningLevel::Release);
        assert_eq!(warning_level(serving(1)), WarningLevel::Release);
        assert_eq!(warning_level(Seat::idle()), WarningLevel::None);
    }

    #[test]
    fn idle_seat_shows_full_penalty() {
        let idle = Seat {
            time_left_sec: 7,
            ..Seat::idle()
        };
        assert_eq!(seat_display(idle), "0:30");
        assert_eq!(seat_display(serving(7)), "0:07");
        let disabled = Seat {
            enabled: false,
            ..Seat::idle()
        };
        assert_eq!(seat_display(disabled), DISABLED_DISPLAY);
    }
}
