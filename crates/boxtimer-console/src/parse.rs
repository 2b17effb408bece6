//! Parsing console input lines into session inputs.
//!
//! A line is either a JSON [`Command`] object or a short text command:
//!
//! ```text
//! start a jammer        cancel b blocker2     adjust a b1 -10
//! add a jammer          sub a jammer          pause b blocker3
//! enable a blocker1     disable a blocker1
//! jam start | jam stop  period end | period start   game end
//! tick                  quit
//! ```
//!
//! Teams are `a`/`b` (or `1`/`2`); positions are `jammer`/`j` and
//! `blocker1`..`blocker3` (or `b1`..`b3`). Blank lines and lines starting
//! with `#` are ignored.

use boxtimer_core::runner::SessionInput;
use boxtimer_types::{Command, Position, SeatKey, Team};

/// Errors produced when a console line cannot be understood.
#[derive(Debug, thiserror::Error)]
pub enum CommandParseError {
    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// The team argument is not recognized.
    #[error("invalid team: {0} (expected a or b)")]
    InvalidTeam(String),

    /// The position argument is not recognized.
    #[error("invalid position: {0} (expected jammer, blocker1, blocker2 or blocker3)")]
    InvalidPosition(String),

    /// The adjustment is not a whole number of seconds.
    #[error("invalid adjustment: {0}")]
    InvalidDelta(String),

    /// Trailing words after a complete command.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// A JSON line did not describe a command.
    #[error("invalid JSON command: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Parse one console line. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns [`CommandParseError`] describing why the line is not a command.
pub fn parse_line(line: &str) -> Result<Option<SessionInput>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.starts_with('{') {
        let command: Command = serde_json::from_str(line)?;
        return Ok(Some(SessionInput::Command(command)));
    }

    let lowered = line.to_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next().unwrap_or_default();

    let input = match verb {
        "quit" | "exit" => SessionInput::Shutdown,
        "tick" => SessionInput::Command(Command::Tick),
        "start" | "sit" => SessionInput::Command(Command::StartPenalty {
            seat: parse_seat(&mut words)?,
        }),
        "cancel" => SessionInput::Command(Command::CancelPenalty {
            seat: parse_seat(&mut words)?,
        }),
        "add" => SessionInput::Command(Command::AddTime {
            seat: parse_seat(&mut words)?,
        }),
        "sub" | "subtract" => SessionInput::Command(Command::SubtractTime {
            seat: parse_seat(&mut words)?,
        }),
        "pause" | "resume" => SessionInput::Command(Command::TogglePause {
            seat: parse_seat(&mut words)?,
        }),
        "enable" | "disable" => SessionInput::Command(Command::SetSeatEnabled {
            seat: parse_seat(&mut words)?,
            enabled: verb == "enable",
        }),
        "adjust" => {
            let seat = parse_seat(&mut words)?;
            let raw = words.next().ok_or(CommandParseError::MissingArgument("seconds"))?;
            let delta_sec = raw
                .parse::<i32>()
                .map_err(|_err| CommandParseError::InvalidDelta(raw.to_owned()))?;
            SessionInput::Command(Command::AdjustTime { seat, delta_sec })
        }
        "jam" => match words.next() {
            Some("start") => SessionInput::Command(Command::StartJam),
            Some("stop") => SessionInput::Command(Command::StopJam),
            Some(other) => return Err(CommandParseError::UnknownCommand(format!("jam {other}"))),
            None => return Err(CommandParseError::MissingArgument("start or stop")),
        },
        "period" => match words.next() {
            Some("start") => SessionInput::Command(Command::StartNewPeriod),
            Some("end") => SessionInput::Command(Command::EndPeriod),
            Some(other) => {
                return Err(CommandParseError::UnknownCommand(format!("period {other}")));
            }
            None => return Err(CommandParseError::MissingArgument("start or end")),
        },
        "game" => match words.next() {
            Some("end") => SessionInput::Command(Command::EndGame),
            Some(other) => return Err(CommandParseError::UnknownCommand(format!("game {other}"))),
            None => return Err(CommandParseError::MissingArgument("end")),
        },
        other => return Err(CommandParseError::UnknownCommand(other.to_owned())),
    };

    if let Some(extra) = words.next() {
        return Err(CommandParseError::UnexpectedArgument(extra.to_owned()));
    }
    Ok(Some(input))
}

fn parse_seat<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<SeatKey, CommandParseError> {
    let team = words.next().ok_or(CommandParseError::MissingArgument("team"))?;
    let position = words
        .next()
        .ok_or(CommandParseError::MissingArgument("position"))?;
    Ok(SeatKey::new(parse_team(team)?, parse_position(position)?))
}

fn parse_team(word: &str) -> Result<Team, CommandParseError> {
    match word {
        "a" | "1" => Ok(Team::A),
        "b" | "2" => Ok(Team::B),
        other => Err(CommandParseError::InvalidTeam(other.to_owned())),
    }
}

fn parse_position(word: &str) -> Result<Position, CommandParseError> {
    match word {
        "jammer" | "j" => Ok(Position::Jammer),
        "blocker1" | "b1" => Ok(Position::Blocker1),
        "blocker2" | "b2" => Ok(Position::Blocker2),
        "blocker3" | "b3" => Ok(Position::Blocker3),
        other => Err(CommandParseError::InvalidPosition(other.to_owned())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line).unwrap() {
            Some(SessionInput::Command(command)) => command,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn seat_commands() {
        assert_eq!(
            command("start a jammer"),
            Command::StartPenalty {
                seat: SeatKey::jammer(Team::A)
            }
        );
        assert_eq!(
            command("  Cancel B blocker2 "),
            Command::CancelPenalty {
                seat: SeatKey::new(Team::B, Position::Blocker2)
            }
        );
        assert_eq!(
            command("adjust 1 b1 -10"),
            Command::AdjustTime {
                seat: SeatKey::new(Team::A, Position::Blocker1),
                delta_sec: -10,
            }
        );
        assert_eq!(
            command("disable b b3"),
            Command::SetSeatEnabled {
                seat: SeatKey::new(Team::B, Position::Blocker3),
                enabled: false,
            }
        );
    }

    #[test]
    fn clock_commands() {
        assert_eq!(command("jam start"), Command::StartJam);
        assert_eq!(command("jam stop"), Command::StopJam);
        assert_eq!(command("period end"), Command::EndPeriod);
        assert_eq!(command("period start"), Command::StartNewPeriod);
        assert_eq!(command("game end"), Command::EndGame);
        assert_eq!(command("tick"), Command::Tick);
    }

    #[test]
    fn quit_and_blank_lines() {
        assert_eq!(parse_line("quit").unwrap(), Some(SessionInput::Shutdown));
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# comment").unwrap(), None);
    }

    #[test]
    fn json_lines() {
        assert_eq!(
            command(r#"{"command":"add_time","seat":{"team":"b","position":"jammer"}}"#),
            Command::AddTime {
                seat: SeatKey::jammer(Team::B)
            }
        );
        assert!(matches!(
            parse_line(r#"{"command":"nope"}"#),
            Err(CommandParseError::Json { .. })
        ));
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(
            parse_line("score a 4"),
            Err(CommandParseError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_line("start c jammer"),
            Err(CommandParseError::InvalidTeam(_))
        ));
        assert!(matches!(
            parse_line("start a goalie"),
            Err(CommandParseError::InvalidPosition(_))
        ));
        assert!(matches!(
            parse_line("start a"),
            Err(CommandParseError::MissingArgument("position"))
        ));
        assert!(matches!(
            parse_line("adjust a jammer soon"),
            Err(CommandParseError::InvalidDelta(_))
        ));
        assert!(matches!(
            parse_line("tick tock"),
            Err(CommandParseError::UnexpectedArgument(_))
        ));
    }
}
