//! Snapshot sink that writes one JSON line per update to stdout.

use std::io::Write as _;

use boxtimer_core::runner::{SnapshotSink, UpdateCause};
use boxtimer_types::{Command, CommandOutcome, GameSnapshot, SeatKey};
use serde::Serialize;
use tracing::warn;

/// One line of console output.
#[derive(Debug, Serialize)]
struct UpdateLine<'a> {
    /// `command` or `tick`.
    cause: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<Command>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<CommandOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    released: Option<&'a [SeatKey]>,
    snapshot: &'a GameSnapshot,
}

impl<'a> UpdateLine<'a> {
    fn new(cause: &'a UpdateCause, snapshot: &'a GameSnapshot) -> Self {
        match cause {
            UpdateCause::Command { command, outcome } => Self {
                cause: "command",
                command: Some(*command),
                outcome: Some(*outcome),
                released: None,
                snapshot,
            },
            UpdateCause::Tick(summary) => Self {
                cause: "tick",
                command: None,
                outcome: None,
                released: (!summary.expired_seats.is_empty())
                    .then_some(summary.expired_seats.as_slice()),
                snapshot,
            },
        }
    }
}

/// Render an update as a single JSON line.
///
/// # Errors
///
/// Returns the serialization error if the snapshot cannot be encoded.
pub fn render_line(
    cause: &UpdateCause,
    snapshot: &GameSnapshot,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&UpdateLine::new(cause, snapshot))
}

/// Writes every update to stdout as newline-delimited JSON.
pub struct StdoutSink;

impl SnapshotSink for StdoutSink {
    fn on_update(&mut self, cause: &UpdateCause, snapshot: &GameSnapshot) {
        let line = match render_line(cause, snapshot) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to serialize snapshot");
                return;
            }
        };
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            warn!(error = %e, "failed to write snapshot");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use boxtimer_core::game::{GameState, TickSummary};
    use boxtimer_types::Team;

    #[test]
    fn command_line_carries_outcome() {
        let mut game = GameState::new();
        let command = Command::StartPenalty {
            seat: SeatKey::jammer(Team::A),
        };
        let outcome = game.apply(command);
        let cause = UpdateCause::Command { command, outcome };

        let line = render_line(&cause, &game.snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["cause"], "command");
        assert_eq!(value["command"]["command"], "start_penalty");
        assert_eq!(value["outcome"], "applied");
        assert!(value.get("released").is_none());
        assert_eq!(value["snapshot"]["seats"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn tick_line_lists_released_seats() {
        let game = GameState::new();
        let cause = UpdateCause::Tick(TickSummary {
            clock_advanced: true,
            jam_expired: false,
            expired_seats: vec![SeatKey::jammer(Team::B)],
        });

        let line = render_line(&cause, &game.snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["cause"], "tick");
        assert!(value.get("command").is_none());
        assert_eq!(value["released"][0]["team"], "b");
        assert!(!line.contains('\n'));
    }
}
