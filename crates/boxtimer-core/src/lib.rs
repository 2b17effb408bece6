//! Jam clock, penalty timing, and session driver for the penalty box timer.
//!
//! This crate composes the clock and the penalty ledger into one game
//! aggregate and drives it from a single serialized event loop.
//!
//! # Modules
//!
//! - [`clock`] -- Jam countdown, period clock, and period/game lifecycle.
//! - [`config`] -- Configuration loading from `boxtimer.yaml` into
//!   strongly-typed structs.
//! - [`display`] -- Clock text, seat states, and warning levels for the
//!   read model.
//! - [`game`] -- [`GameState`]: the command surface and the tick.
//! - [`runner`] -- The async session loop that owns a [`GameState`].
//!
//! [`GameState`]: game::GameState

pub mod clock;
pub mod config;
pub mod display;
pub mod game;
pub mod runner;
