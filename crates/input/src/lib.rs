//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`crate::types::Command`] values plus the runner's own
//! restart and quit keys. It holds no state: every press is one command.

pub mod map;

pub use puzzletris_types as types;

pub use map::{handle_key_event, is_restart, should_quit};
