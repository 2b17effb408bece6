//! Console front end for the penalty box timer.
//!
//! Reads commands from stdin one per line, drives a single timing session,
//! and writes one JSON snapshot per update to stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `boxtimer.yaml` (or `$BOXTIMER_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Start the stdin reader and Ctrl-C handler
//! 4. Run the session until `quit`, end of input, or the tick limit
//! 5. Log the result
//!
//! # Piped input
//!
//! End of stdin closes the command channel and ends the session. A piped
//! script therefore finishes before any wall-clock tick fires; it advances
//! time only through explicit `tick` lines:
//!
//! ```text
//! printf 'jam start\nstart a jammer\ntick\ntick\n' | boxtimer-console
//! ```

mod error;
mod parse;
mod sink;

use std::io::BufRead as _;
use std::path::{Path, PathBuf};

use boxtimer_core::config::{
    BoxTimerConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig,
};
use boxtimer_core::game::GameState;
use boxtimer_core::runner::{self, SessionInput};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ConsoleError;
use crate::parse::parse_line;
use crate::sink::StdoutSink;

/// Capacity of the command channel between the reader and the session.
const INPUT_CHANNEL_CAPACITY: usize = 64;

/// Application entry point for the console.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the session fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("boxtimer-console starting");
    info!(
        source = %source.display(),
        tick_interval_ms = config.session.tick_interval_ms,
        max_ticks = config.session.max_ticks,
        log_format = ?config.logging.format,
        "Configuration loaded"
    );

    // 3. Wire inputs.
    let (tx, mut rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    spawn_ctrl_c_handler(tx.downgrade());
    spawn_stdin_reader(tx);

    // 4. Run the session.
    let mut state = GameState::new();
    let mut sink = StdoutSink;
    let result = runner::run_session(&mut state, &config.session, &mut rx, &mut sink)
        .await
        .map_err(ConsoleError::from)?;

    // 5. Log results.
    runner::log_session_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "boxtimer-console shutdown complete"
    );

    Ok(())
}

/// Load configuration.
///
/// An explicit `$BOXTIMER_CONFIG` path must exist. Otherwise
/// `boxtimer.yaml` is used if present and defaults if not. Returns the
/// config together with where it came from.
fn load_config() -> Result<(BoxTimerConfig, PathBuf), ConsoleError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        let config = BoxTimerConfig::from_file(&path)?;
        return Ok((config, path));
    }

    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        let config = BoxTimerConfig::from_file(path)?;
        Ok((config, path.to_path_buf()))
    } else {
        Ok((BoxTimerConfig::default(), PathBuf::from("<defaults>")))
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured
/// level. Output goes to stderr.
fn init_logging(logging: &LoggingConfig) -> Result<(), ConsoleError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| ConsoleError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match logging.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ConsoleError::Logging {
        message: e.to_string(),
    })
}

/// Read stdin on a dedicated thread and forward parsed inputs.
///
/// The thread stops after `quit`, at end of input, or when the session
/// has gone away. Dropping its sender lets the session end with
/// `InputClosed` once stdin is exhausted.
fn spawn_stdin_reader(tx: mpsc::Sender<SessionInput>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            };
            match parse_line(&line) {
                Ok(Some(input)) => {
                    let shutdown = input == SessionInput::Shutdown;
                    if tx.blocking_send(input).is_err() || shutdown {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, line = line.trim(), "Ignoring console line"),
            }
        }
        debug!("Stdin reader finished");
    });
}

/// Turn Ctrl-C into a clean shutdown.
///
/// Holds only a weak sender so the channel still closes when stdin ends.
fn spawn_ctrl_c_handler(tx: mpsc::WeakSender<SessionInput>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received");
                if let Some(tx) = tx.upgrade() {
                    let _ = tx.send(SessionInput::Shutdown).await;
                }
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
}
