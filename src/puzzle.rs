//! Puzzle instance
//!
//! Setup glue around the core: counts relevant modules, assigns constants,
//! generates stages, logs the diagnostic report and forwards host events to
//! the progression controller.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::Serialize;

use crate::display::{self, Frame};
use crate::edgework::Edgework;
use crate::error::PuzzleError;
use crate::settings::Settings;
use crate::sim::{
    Assignment, AssignmentSummary, ProgressionController, PuzzleEvent, SLOT_COUNT, assign,
    generate_stages, slot_label,
};

/// Modules that never count as stages (boss modules and timing-sensitive ones)
const DEFAULT_IGNORED_MODULES: [&str; 24] = [
    "14",
    "8",
    "Forget Enigma",
    "Forget Everything",
    "Forget It Not",
    "Forget Me Later",
    "Forget Me Not",
    "Forget Perspective",
    "Forget Them All",
    "Forget This",
    "Forget Us Not",
    "Forget Me No.",
    "Organization",
    "Purgatory",
    "Simon's Stages",
    "Souvenir",
    "Tallordered Keys",
    "The Time Keeper",
    "Timing is Everything",
    "The Troll",
    "Turn The Key",
    "Übermodule",
    "Ültimate Custom Night",
    "The Very Annoying Button",
];

static IGNORED_MODULES: OnceLock<Vec<String>> = OnceLock::new();
static NEXT_INSTANCE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-wide ignore list, built on first use and read-only afterwards.
///
/// The built-in names are the whole shared set; names from
/// `Settings::extra_ignored_modules` stay on the instance that was given them.
pub fn ignored_modules() -> &'static [String] {
    IGNORED_MODULES.get_or_init(|| DEFAULT_IGNORED_MODULES.iter().map(|s| s.to_string()).collect())
}

/// Digit carried by a button; buttons read 1-9 then 0
pub fn button_digit(button: usize) -> Result<u8, PuzzleError> {
    if button >= SLOT_COUNT {
        return Err(PuzzleError::InvalidDigit(button.min(u8::MAX as usize) as u8));
    }
    Ok(slot_label(button))
}

/// One stage line of the diagnostic report
#[derive(Debug, Clone, Serialize)]
pub struct StageLine {
    pub stage: usize,
    pub rolled: u8,
    /// Label of the LED lit for this stage
    pub led: u8,
}

/// Diagnostic dump produced once after setup
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: u32,
    pub assignment: AssignmentSummary,
    pub symbols: Vec<&'static str>,
    pub stages: Vec<StageLine>,
    /// Answers in groups of three
    pub answer: String,
}

/// A single puzzle instance
#[derive(Debug)]
pub struct Puzzle {
    id: u32,
    assignment: Assignment,
    controller: ProgressionController,
    extra_ignored: Vec<String>,
}

impl Puzzle {
    /// Build a puzzle from edgework and settings.
    ///
    /// The rng is only used for stage generation.
    pub fn setup<R: Rng + ?Sized>(
        edgework: &Edgework,
        settings: &Settings,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        let extra_ignored = settings.extra_ignored_modules.clone();

        let stage_count = match settings.stage_count()? {
            Some(count) => count,
            None => count_relevant(&extra_ignored, edgework.solvable_module_names()),
        };
        if stage_count == 0 {
            log::info!("[Recall #{}] No non-ignored modules were detected.", id);
        }

        let assignment = assign(edgework)?;
        let sequence = generate_stages(&assignment, stage_count, rng);
        let controller = ProgressionController::new(sequence).with_instance_id(id);

        let puzzle = Self {
            id,
            assignment,
            controller,
            extra_ignored,
        };
        if settings.log_diagnostics {
            puzzle.log_report();
        }
        Ok(puzzle)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn controller(&self) -> &ProgressionController {
        &self.controller
    }

    /// Whether a module name is excluded from stage counting
    pub fn is_ignored(&self, name: &str) -> bool {
        is_ignored(&self.extra_ignored, name)
    }

    /// Host activation signal
    pub fn activate(&mut self) -> Vec<PuzzleEvent> {
        self.controller.activate()
    }

    /// Poll with the host's solved module names; ignored names are skipped
    pub fn observe_solved<'a>(
        &mut self,
        solved_names: impl IntoIterator<Item = &'a str>,
    ) -> Vec<PuzzleEvent> {
        let solved = count_relevant(&self.extra_ignored, solved_names);
        self.controller.observe_progress(solved)
    }

    /// Poll with an already filtered solved count
    pub fn observe_progress(&mut self, solved: usize) -> Vec<PuzzleEvent> {
        self.controller.observe_progress(solved)
    }

    /// Press the button carrying `digit`
    pub fn press(&mut self, digit: u8) -> Result<Vec<PuzzleEvent>, PuzzleError> {
        if digit > 9 {
            return Err(PuzzleError::InvalidDigit(digit));
        }
        Ok(self.controller.press(digit))
    }

    /// Press a button by position (0 = leftmost, labeled 1)
    pub fn press_button(&mut self, button: usize) -> Result<Vec<PuzzleEvent>, PuzzleError> {
        let digit = button_digit(button)?;
        self.press(digit)
    }

    /// Current display frame
    pub fn frame(&self) -> Frame {
        display::frame(&self.controller)
    }

    pub fn report(&self) -> Report {
        let sequence = self.controller.sequence();
        Report {
            id: self.id,
            assignment: AssignmentSummary::from(&self.assignment),
            symbols: self.assignment.kinds().iter().map(|k| k.symbol()).collect(),
            stages: sequence
                .stages
                .iter()
                .enumerate()
                .map(|(i, stage)| StageLine {
                    stage: i + 1,
                    rolled: stage.rolled,
                    led: slot_label(stage.slot),
                })
                .collect(),
            answer: sequence.grouped_answers(),
        }
    }

    fn log_report(&self) {
        let report = self.report();
        log::info!(
            "[Recall #{}] Constants assigned to each LED from 1 to 0 are as follows: {}",
            self.id,
            report.symbols.join(", ")
        );
        log::info!(
            "[Recall #{}] The following condition to determine the remaining constants is: {}",
            self.id,
            report.assignment.rule
        );
        for line in &report.stages {
            log::info!(
                "[Recall #{}] Stage {}: {}, LED {}",
                self.id,
                line.stage,
                line.rolled,
                line.led
            );
        }
        log::info!(
            "[Recall #{}] The final answer in groups of 3 is: {}",
            self.id,
            report.answer
        );
    }
}

fn is_ignored(extra: &[String], name: &str) -> bool {
    ignored_modules().iter().chain(extra).any(|ignored| ignored == name)
}

fn count_relevant<'a>(extra: &[String], names: impl IntoIterator<Item = &'a str>) -> usize {
    names
        .into_iter()
        .filter(|name| !is_ignored(extra, name))
        .count()
}
