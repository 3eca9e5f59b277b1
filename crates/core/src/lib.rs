//! Core engine - pure, deterministic falling-block puzzle logic
//!
//! Owns grid occupancy, the falling piece, collision checks, SRS rotation with wall kicks,
//! row clearing with compaction, scoring and shape sequencing. Nothing here draws, reads keys
//! or looks at a clock: callers feed commands and elapsed time and poll snapshots.
//!
//! # Module Structure
//!
//! - [`catalog`]: shape cell offsets, tiles and kick classes
//! - [`kicks`]: SRS wall kick tables
//! - [`grid`]: occupancy store, validity checks, presets and row sweeping
//! - [`piece`]: the active piece and its move/rotate attempts
//! - [`sequencer`]: scripted or seeded-random shape supply
//! - [`scoring`]: flat per-clear points table
//! - [`observer`]: score change subscriptions
//! - [`session`]: the game loop state machine
//! - [`snapshot`]: render query surface
//!
//! # Coordinates
//!
//! The board is centred on `x = 0` with `y` growing upwards. A piece keeps its pivot-relative
//! cells and its position apart; board cells are their sum.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use puzzletris_core::{Session, SessionConfig, StepOutcome};
//! use puzzletris_core::types::Command;
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.start();
//!
//! assert_eq!(session.submit_command(Command::MoveRight), StepOutcome::Moved);
//! assert_eq!(session.advance_time(Duration::from_millis(400)), StepOutcome::Waiting);
//! assert_eq!(session.score(), 0);
//! ```

pub mod catalog;
pub mod config;
pub mod grid;
pub mod kicks;
pub mod observer;
pub mod piece;
pub mod preset;
pub mod rng;
pub mod scoring;
pub mod sequencer;
pub mod session;
pub mod snapshot;

pub use puzzletris_types as types;

pub use catalog::{KickClass, ShapeDefinition};
pub use config::{BoardSize, SequenceConfig, SessionConfig};
pub use grid::Grid;
pub use observer::{ScoreObservers, SubscriptionId};
pub use piece::{ActivePiece, MoveDirection, MoveOutcome, RotateDirection};
pub use rng::SimpleRng;
pub use scoring::line_clear_points;
pub use sequencer::Sequencer;
pub use session::{LockEvent, Session, SessionState, SpawnOutcome, StepOutcome};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
