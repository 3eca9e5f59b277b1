//! Puzzletris (workspace facade crate).
//!
//! Re-exports the member crates under one name and hosts the runner's configuration layer.

pub mod config;

pub use puzzletris_core as core;
pub use puzzletris_input as input;
pub use puzzletris_term as term;
pub use puzzletris_types as types;
