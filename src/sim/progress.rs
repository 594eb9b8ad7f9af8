//! Progression state machine
//!
//! Inactive -> Running(k) -> Submitting -> Solved. Strikes are events, not
//! states. All transitions are driven by discrete host events: activation,
//! polled progress counts and button presses. Callers must serialize events.

use serde::{Deserialize, Serialize};

use super::stages::StageSequence;

/// Entries shown on one page of the progress display
pub const PAGE_CAPACITY: usize = 24;
/// Entries per display row
pub const ROW_WIDTH: usize = 12;
/// Entries per visual group within a row
pub const GROUP_WIDTH: usize = 3;
/// Glyph for entries not yet submitted
pub const PLACEHOLDER: char = '-';

/// Current phase of the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the host to activate
    Inactive,
    /// Stages are being revealed; `reveal` is the stage on display
    Running { reveal: usize },
    /// All other modules done, digits are being entered
    Submitting,
    /// Every digit entered
    Solved,
}

/// Why a strike was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeReason {
    /// Pressed before activation
    NotActivated,
    /// Pressed while stages are still being revealed
    NotReady,
    /// Wrong digit for the stage being entered
    WrongDigit { stage: usize, expected: u8, entered: u8 },
}

/// Events reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleEvent {
    /// A stage is shown; `hint` marks a re-reveal after a wrong digit
    StageRevealed { stage: usize, hint: bool },
    /// Reveal display cleared, progress page shown
    SubmissionOpened,
    /// A correct digit was entered for `stage`
    DigitAccepted { stage: usize, digit: u8 },
    Strike(StrikeReason),
    Solved,
}

/// Mutable runtime state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub phase: Phase,
    /// Last polled count of relevant solved modules
    pub solved_other_count: usize,
    /// Digits entered correctly so far
    pub entered_count: usize,
    /// Stage re-revealed after the last wrong digit
    pub hint: Option<usize>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            phase: Phase::Inactive,
            solved_other_count: 0,
            entered_count: 0,
            hint: None,
        }
    }
}

impl ProgressionState {
    pub fn activated(&self) -> bool {
        self.phase != Phase::Inactive
    }

    pub fn current_reveal_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Running { reveal } => Some(reveal),
            _ => None,
        }
    }

    pub fn ready_to_submit(&self) -> bool {
        matches!(self.phase, Phase::Submitting | Phase::Solved)
    }

    pub fn solved(&self) -> bool {
        self.phase == Phase::Solved
    }
}

/// Window of the progress display for a given entry count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First stage index shown
    pub start: usize,
    /// One past the last stage index shown
    pub end: usize,
}

/// Compute the visible window.
///
/// Pages forward by one row whenever more than 23 entries sit ahead of the
/// window start, except that a total of exactly 24 never pages.
pub fn page_window(entered: usize, stage_count: usize) -> PageWindow {
    let mut current = entered;
    let mut last = stage_count;
    let mut start = 0;

    while current > PAGE_CAPACITY - 1 && last != PAGE_CAPACITY {
        current -= ROW_WIDTH;
        last = last.saturating_sub(ROW_WIDTH);
        start += ROW_WIDTH;
    }

    PageWindow {
        start,
        end: (start + PAGE_CAPACITY).min(stage_count),
    }
}

/// Render the progress page: entered digits, placeholders for the rest,
/// groups of three split by spaces and rows of twelve split by newlines.
pub fn render_page(answers: &[u8], entered: usize) -> String {
    let window = page_window(entered, answers.len());
    let mut text = String::new();

    for i in window.start..window.end {
        if i > window.start && i % GROUP_WIDTH == 0 {
            text.push(if i % ROW_WIDTH == 0 { '\n' } else { ' ' });
        }
        if i < entered {
            text.push(char::from(b'0' + answers[i]));
        } else {
            text.push(PLACEHOLDER);
        }
    }

    text
}

/// Drives one puzzle instance through its phases
#[derive(Debug, Clone)]
pub struct ProgressionController {
    /// Instance id used to tag log lines
    id: u32,
    sequence: StageSequence,
    state: ProgressionState,
}

impl ProgressionController {
    pub fn new(sequence: StageSequence) -> Self {
        Self {
            id: 0,
            sequence,
            state: ProgressionState::default(),
        }
    }

    /// Tag log output with a puzzle instance id
    pub fn with_instance_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn sequence(&self) -> &StageSequence {
        &self.sequence
    }

    pub fn stage_count(&self) -> usize {
        self.sequence.len()
    }

    /// Remaining digits to enter
    pub fn remaining(&self) -> usize {
        self.stage_count() - self.state.entered_count
    }

    /// Progress page for the current entry count
    pub fn progress_text(&self) -> String {
        render_page(&self.sequence.answers, self.state.entered_count)
    }

    /// Host activation signal
    pub fn activate(&mut self) -> Vec<PuzzleEvent> {
        if self.state.activated() {
            return Vec::new();
        }

        if self.stage_count() == 0 {
            log::info!("[Recall #{}] No stages to enter. Solving...", self.id);
            self.state.phase = Phase::Solved;
            return vec![PuzzleEvent::Solved];
        }

        self.state.phase = Phase::Running { reveal: 0 };
        vec![PuzzleEvent::StageRevealed {
            stage: 0,
            hint: false,
        }]
    }

    /// Host progress poll with the current count of relevant solved modules
    pub fn observe_progress(&mut self, solved: usize) -> Vec<PuzzleEvent> {
        let Phase::Running { mut reveal } = self.state.phase else {
            return Vec::new();
        };
        self.state.solved_other_count = solved;

        if solved >= self.stage_count() {
            log::info!(
                "[Recall #{}] All {} stages revealed, ready for submission",
                self.id,
                self.stage_count()
            );
            self.state.phase = Phase::Submitting;
            return vec![PuzzleEvent::SubmissionOpened];
        }

        let mut events = Vec::new();
        while solved > reveal {
            reveal += 1;
            events.push(PuzzleEvent::StageRevealed {
                stage: reveal,
                hint: false,
            });
        }
        self.state.phase = Phase::Running { reveal };
        events
    }

    /// Button press carrying a digit 0-9
    pub fn press(&mut self, digit: u8) -> Vec<PuzzleEvent> {
        match self.state.phase {
            Phase::Solved => Vec::new(),
            Phase::Inactive => {
                log::info!("[Recall #{}] Pressed {} before activation. Strike!", self.id, digit);
                vec![PuzzleEvent::Strike(StrikeReason::NotActivated)]
            }
            Phase::Running { .. } => {
                log::info!(
                    "[Recall #{}] The module isn't ready to be submitted yet. Strike!",
                    self.id
                );
                vec![PuzzleEvent::Strike(StrikeReason::NotReady)]
            }
            Phase::Submitting => self.submit(digit),
        }
    }

    fn submit(&mut self, digit: u8) -> Vec<PuzzleEvent> {
        let stage = self.state.entered_count;
        let expected = self.sequence.answers[stage];

        if digit != expected {
            log::info!(
                "[Recall #{}] The digit expected for stage {} is {}, but inputted {} instead. Strike!",
                self.id,
                stage + 1,
                expected,
                digit
            );
            self.state.hint = Some(stage);
            return vec![
                PuzzleEvent::Strike(StrikeReason::WrongDigit {
                    stage,
                    expected,
                    entered: digit,
                }),
                PuzzleEvent::StageRevealed { stage, hint: true },
            ];
        }

        self.state.entered_count += 1;
        self.state.hint = None;
        let mut events = vec![PuzzleEvent::DigitAccepted { stage, digit }];

        if self.state.entered_count == self.stage_count() {
            log::info!("[Recall #{}] All digits have been entered correctly. Solved!", self.id);
            self.state.phase = Phase::Solved;
            events.push(PuzzleEvent::Solved);
        }
        events
    }
}
