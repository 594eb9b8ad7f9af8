//! Deterministic puzzle core
//!
//! All puzzle logic lives here. This module must be pure and deterministic:
//! - Assignment depends on edgework only
//! - Seeded RNG only, passed in by the caller
//! - No rendering or platform dependencies

pub mod assign;
pub mod catalog;
pub mod progress;
pub mod stages;

pub use assign::{Assignment, AssignmentSummary, ORDER_RULES, OrderRule, assign, select_rule, slot_label};
pub use catalog::{CONSTANT_COUNT, Constant, ConstantKind, EXPANSION_LEN};
pub use progress::{
    Phase, ProgressionController, ProgressionState, PuzzleEvent, StrikeReason, page_window,
    render_page,
};
pub use stages::{Stage, StageSequence, answer_for, generate_stages};

/// Number of slots (one per constant)
pub const SLOT_COUNT: usize = CONSTANT_COUNT;
