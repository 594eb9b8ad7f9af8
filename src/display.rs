//! Display projection
//!
//! What the host should show, derived from puzzle state. Drawing the text
//! and lighting the LEDs is left to the host.

use serde::Serialize;

use crate::sim::{Phase, ProgressionController, SLOT_COUNT};

/// Stage label shown while no stage is on display
pub const IDLE_STAGE_LABEL: &str = "--";

/// One frame of display state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Two-digit stage counter (1-based, wraps at 100)
    pub stage_label: String,
    /// Rolled digit of the displayed stage
    pub big: String,
    /// Progress page while submitting
    pub progress: String,
    /// LED per slot; lit for the displayed stage's slot
    pub leds: [bool; SLOT_COUNT],
}

impl Frame {
    fn blank() -> Self {
        Self {
            stage_label: String::new(),
            big: String::new(),
            progress: String::new(),
            leds: [false; SLOT_COUNT],
        }
    }

    fn idle() -> Self {
        Self {
            stage_label: IDLE_STAGE_LABEL.to_string(),
            ..Self::blank()
        }
    }

    /// Index of the lit LED, if any
    pub fn lit_led(&self) -> Option<usize> {
        self.leds.iter().position(|&lit| lit)
    }
}

/// Two-digit label for a 0-based stage index
pub fn stage_label(stage: usize) -> String {
    format!("{:02}", (stage + 1) % 100)
}

/// Build the frame for the controller's current state
pub fn frame(controller: &ProgressionController) -> Frame {
    let state = controller.state();

    match state.phase {
        Phase::Inactive if controller.stage_count() == 0 => Frame::idle(),
        Phase::Inactive => Frame::blank(),
        Phase::Running { reveal } => stage_frame(controller, reveal),
        Phase::Submitting => match state.hint {
            // The progress page is cleared while the missed stage is shown
            Some(stage) => stage_frame(controller, stage),
            None => Frame {
                progress: controller.progress_text(),
                ..Frame::idle()
            },
        },
        Phase::Solved => Frame {
            progress: controller.progress_text(),
            ..Frame::idle()
        },
    }
}

fn stage_frame(controller: &ProgressionController, index: usize) -> Frame {
    let stage = &controller.sequence().stages[index];
    let mut leds = [false; SLOT_COUNT];
    leds[stage.slot] = true;

    Frame {
        stage_label: stage_label(index),
        big: stage.rolled.to_string(),
        progress: String::new(),
        leds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ConstantKind, Stage, StageSequence};

    fn controller() -> ProgressionController {
        let stages = vec![
            Stage {
                slot: 4,
                kind: ConstantKind::Phi,
                rolled: 8,
            },
            Stage {
                slot: 9,
                kind: ConstantKind::E,
                rolled: 2,
            },
        ];
        ProgressionController::new(StageSequence {
            stages,
            answers: vec![5, 0],
        })
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(stage_label(0), "01");
        assert_eq!(stage_label(41), "42");
        assert_eq!(stage_label(99), "00");
        assert_eq!(stage_label(100), "01");
    }

    #[test]
    fn test_running_frame_shows_stage() {
        let mut c = controller();
        assert_eq!(frame(&c), Frame::blank());
        c.activate();
        let f = frame(&c);
        assert_eq!(f.stage_label, "01");
        assert_eq!(f.big, "8");
        assert_eq!(f.lit_led(), Some(4));
        c.observe_progress(1);
        assert_eq!(frame(&c).lit_led(), Some(9));
    }

    #[test]
    fn test_submitting_frame_and_hint() {
        let mut c = controller();
        c.activate();
        c.observe_progress(2);
        let f = frame(&c);
        assert_eq!(f.stage_label, IDLE_STAGE_LABEL);
        assert_eq!(f.progress, "--");
        assert_eq!(f.lit_led(), None);

        c.press(5);
        c.press(3);
        let hint = frame(&c);
        assert_eq!(hint.stage_label, "02");
        assert_eq!(hint.big, "2");
        assert_eq!(hint.lit_led(), Some(9));
        assert!(hint.progress.is_empty());

        c.press(0);
        let solved = frame(&c);
        assert_eq!(solved.progress, "50");
        assert_eq!(solved.lit_led(), None);
    }
}
