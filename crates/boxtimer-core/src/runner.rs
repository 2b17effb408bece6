//! Session driver: the one event loop that owns a [`GameState`].
//!
//! This module provides [`run_session`], the async function that drives
//! the tick loop and serializes it with incoming commands:
//!
//! - **Fixed cadence**: a `tokio` interval fires one tick per
//!   `tick_interval_ms`; each tick is one simulated second.
//! - **Serialized commands**: commands arrive on an `mpsc` channel and are
//!   drained before the next tick, so nothing ever runs concurrently with
//!   a tick.
//! - **Bounded sessions**: stop after `max_ticks`, on a shutdown input, or
//!   when every input sender is gone.
//! - **Invariant checks**: the state is verified after every step; a
//!   violation ends the session with an error.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use boxtimer_types::{Command, CommandOutcome, GameSnapshot, SessionId};

use crate::config::SessionConfig;
use crate::game::{GameState, InvariantViolation, TickSummary};

/// Errors that can occur during a session.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The timing state broke an invariant.
    #[error("invariant violation: {source}")]
    Invariant {
        /// The underlying violation.
        #[from]
        source: InvariantViolation,
    },
}

/// One message into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    /// Apply a command.
    Command(Command),
    /// End the session cleanly.
    Shutdown,
}

/// Reason why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// A shutdown input was received.
    Shutdown,
    /// Every input sender was dropped.
    InputClosed,
}

/// What caused a snapshot update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCause {
    /// A command was applied or refused.
    Command {
        /// The command.
        command: Command,
        /// Whether it was applied.
        outcome: CommandOutcome,
    },
    /// A tick ran.
    Tick(TickSummary),
}

/// Receives a fresh snapshot after every command and tick.
///
/// Implementations render or forward the snapshot; they must not block.
pub trait SnapshotSink {
    /// Called after each step with its cause and the resulting snapshot.
    fn on_update(&mut self, cause: &UpdateCause, snapshot: &GameSnapshot);
}

/// A sink that discards every update.
pub struct NoOpSink;

impl SnapshotSink for NoOpSink {
    fn on_update(&mut self, _cause: &UpdateCause, _snapshot: &GameSnapshot) {}
}

/// Result of a session run.
#[derive(Debug)]
pub struct SessionResult {
    /// Identifier of this session.
    pub session_id: SessionId,
    /// The reason the session ended.
    pub end_reason: SessionEndReason,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Wall-clock start of the session.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end of the session.
    pub ended_at: DateTime<Utc>,
    /// State at the end of the session.
    pub final_snapshot: GameSnapshot,
}

enum Step {
    Input(Option<SessionInput>),
    Tick,
}

/// Run a session until a termination condition is met.
///
/// # Arguments
///
/// * `state` - The timing state this session owns for its duration
/// * `config` - Tick cadence and bounds
/// * `inputs` - Commands from the rendering side
/// * `sink` - Called after each command and tick
///
/// # Errors
///
/// Returns [`RunnerError::Invariant`] if the state breaks an invariant.
pub async fn run_session(
    state: &mut GameState,
    config: &SessionConfig,
    inputs: &mut mpsc::Receiver<SessionInput>,
    sink: &mut dyn SnapshotSink,
) -> Result<SessionResult, RunnerError> {
    let session_id = SessionId::new();
    let started_at = Utc::now();
    let mut total_ticks: u64 = 0;

    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        session_id = %session_id,
        tick_interval_ms = config.tick_interval_ms,
        max_ticks = config.max_ticks,
        "Session starting"
    );

    let end_reason = loop {
        let step = tokio::select! {
            biased;
            input = inputs.recv() => Step::Input(input),
            _ = interval.tick() => Step::Tick,
        };

        match step {
            Step::Input(None) => {
                info!("Input channel closed");
                break SessionEndReason::InputClosed;
            }
            Step::Input(Some(SessionInput::Shutdown)) => {
                info!("Shutdown requested");
                break SessionEndReason::Shutdown;
            }
            Step::Input(Some(SessionInput::Command(Command::Tick))) | Step::Tick => {
                run_tick(state, sink)?;
                total_ticks = total_ticks.saturating_add(1);
            }
            Step::Input(Some(SessionInput::Command(command))) => {
                let outcome = state.apply(command);
                if !outcome.is_applied() {
                    debug!(
                        ?command,
                        seat = ?command.seat(),
                        "Command rejected by current state"
                    );
                }
                state.verify_invariants()?;
                sink.on_update(&UpdateCause::Command { command, outcome }, &state.snapshot());
            }
        }

        if config.max_ticks > 0 && total_ticks >= config.max_ticks {
            info!(total_ticks, max_ticks = config.max_ticks, "Tick limit reached");
            break SessionEndReason::MaxTicksReached;
        }
    };

    Ok(SessionResult {
        session_id,
        end_reason,
        total_ticks,
        started_at,
        ended_at: Utc::now(),
        final_snapshot: state.snapshot(),
    })
}

fn run_tick(state: &mut GameState, sink: &mut dyn SnapshotSink) -> Result<(), RunnerError> {
    let summary = state.tick();
    if summary.jam_expired {
        info!("Jam clock expired");
    }
    for seat in &summary.expired_seats {
        debug!(seat = %seat, "Seat released");
    }
    state.verify_invariants()?;
    sink.on_update(&UpdateCause::Tick(summary), &state.snapshot());
    Ok(())
}

/// Log the end of a session.
pub fn log_session_end(result: &SessionResult) {
    let elapsed_ms = result
        .ended_at
        .signed_duration_since(result.started_at)
        .num_milliseconds();
    info!(
        session_id = %result.session_id,
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        elapsed_ms,
        period = result.final_snapshot.period.period_number,
        jam = result.final_snapshot.jam.jam_number,
        "Session ended"
    );
    if result.total_ticks == 0 {
        warn!("Session ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use boxtimer_types::{Position, SeatKey, Team};

    const A_BLOCKER: SeatKey = SeatKey::new(Team::A, Position::Blocker1);

    #[derive(Default)]
    struct RecordingSink {
        commands: Vec<(Command, CommandOutcome)>,
        ticks: usize,
    }

    impl SnapshotSink for RecordingSink {
        fn on_update(&mut self, cause: &UpdateCause, _snapshot: &GameSnapshot) {
            match cause {
                UpdateCause::Command { command, outcome } => {
                    self.commands.push((*command, *outcome));
                }
                UpdateCause::Tick(_) => self.ticks = self.ticks.saturating_add(1),
            }
        }
    }

    fn config(max_ticks: u64) -> SessionConfig {
        SessionConfig {
            tick_interval_ms: 1_000,
            max_ticks,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_max_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(SessionInput::Command(Command::StartPenalty { seat: A_BLOCKER }))
            .await
            .unwrap();
        tx.send(SessionInput::Command(Command::StartJam)).await.unwrap();

        let mut state = GameState::new();
        let result = run_session(&mut state, &config(5), &mut rx, &mut NoOpSink)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SessionEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_snapshot.jam.jam_time_sec, 115);
        let seat = result.final_snapshot.seat(A_BLOCKER).unwrap();
        assert_eq!(seat.seat.time_left_sec, 25);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_input_stops_session() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(SessionInput::Shutdown).await.unwrap();

        let mut state = GameState::new();
        let result = run_session(&mut state, &config(0), &mut rx, &mut NoOpSink)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SessionEndReason::Shutdown);
        assert_eq!(result.total_ticks, 0);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_stops_session() {
        let (tx, mut rx) = mpsc::channel::<SessionInput>(8);
        drop(tx);

        let mut state = GameState::new();
        let result = run_session(&mut state, &config(0), &mut rx, &mut NoOpSink)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SessionEndReason::InputClosed);
        assert_eq!(result.total_ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sink_sees_every_command_and_tick() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(SessionInput::Command(Command::StartNewPeriod))
            .await
            .unwrap();
        tx.send(SessionInput::Command(Command::StartJam)).await.unwrap();
        tx.send(SessionInput::Command(Command::Tick)).await.unwrap();

        let mut state = GameState::new();
        let mut sink = RecordingSink::default();
        let result = run_session(&mut state, &config(3), &mut rx, &mut sink)
            .await
            .unwrap();

        assert_eq!(result.total_ticks, 3);
        assert_eq!(
            sink.commands,
            vec![
                (Command::StartNewPeriod, CommandOutcome::Rejected),
                (Command::StartJam, CommandOutcome::Applied),
            ]
        );
        assert_eq!(sink.ticks, 3);
        assert_eq!(result.final_snapshot.jam.jam_time_sec, 117);
        drop(tx);
    }
}
