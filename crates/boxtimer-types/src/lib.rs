//! Shared type definitions for the penalty box timer.
//!
//! This crate is the single source of truth for the seat keys, seat
//! records, commands and snapshot read model used across the workspace.
//! Types flow to `TypeScript` via `ts-rs` for the rendering side.
//!
//! # Modules
//!
//! - [`enums`] -- Teams, positions, and read-model classifications
//! - [`structs`] -- Seat keys, seat records, and snapshots
//! - [`commands`] -- Commands issued by the rendering side
//! - [`ids`] -- Session identifiers
//! - [`timing`] -- Fixed timekeeping constants

pub mod commands;
pub mod enums;
pub mod ids;
pub mod structs;
pub mod timing;

// Re-export all public types at crate root for convenience.
pub use commands::Command;
pub use enums::{CommandOutcome, Position, SeatState, Team, WarningLevel};
pub use ids::SessionId;
pub use structs::{GameSnapshot, JamClockSnapshot, PeriodSnapshot, Seat, SeatKey, SeatSnapshot};
