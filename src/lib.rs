//! Recall Puzzle - logic core of a constants-and-stages memory puzzle
//!
//! Core modules:
//! - `sim`: Deterministic core (constant assignment, stages, progression)
//! - `edgework`: Host environment facts
//! - `display`: Display state projection
//! - `command`: Remote text commands
//! - `puzzle`: Per-instance setup and event routing
//! - `settings`: JSON configuration

pub mod command;
pub mod display;
pub mod edgework;
pub mod error;
pub mod puzzle;
pub mod settings;
pub mod sim;

pub use edgework::Edgework;
pub use error::PuzzleError;
pub use puzzle::Puzzle;
pub use settings::{Scenario, Settings};
