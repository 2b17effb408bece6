//! Error types for the console binary.
//!
//! [`ConsoleError`] wraps every failure that can stop the console before
//! or during a session.

/// Top-level error for the console binary.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: boxtimer_core::config::ConfigError,
    },

    /// The session ended with an invariant violation.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: boxtimer_core::runner::RunnerError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging setup failed: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
