//! Remote text commands
//!
//! Parses `press`/`submit` digit sequences and feeds them through the same
//! press path as physical buttons. Nothing here can enter a digit without
//! the controller validating it.

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::error::PuzzleError;
use crate::puzzle::Puzzle;
use crate::sim::{Phase, PuzzleEvent, SLOT_COUNT};

/// Usage text for remote operators
pub const HELP: &str = "press/submit 1234 [to submit your sequence]. The sequence length depends on how many modules were present. You may use spaces in the digit sequence";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("Specify what digits to press!")]
    MissingDigits,

    #[error("Invalid character in sequence: '{0}'. Valid characters are 0-9, and space.")]
    InvalidCharacter(char),

    #[error("Too many digits submitted! {given} given, {remaining} remaining")]
    TooManyDigits { given: usize, remaining: usize },

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

/// A parsed remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press these digits in order
    Press(Vec<u8>),
}

impl Command {
    /// Parse `press 123 456` or `submit 123456` (case-insensitive)
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut words = input.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        if verb != "press" && verb != "submit" {
            return Err(CommandError::UnknownCommand(input.trim().to_string()));
        }

        let mut digits = Vec::new();
        for c in words.flat_map(str::chars) {
            let digit = c.to_digit(10).ok_or(CommandError::InvalidCharacter(c))?;
            digits.push(digit as u8);
        }

        if digits.is_empty() {
            return Err(CommandError::MissingDigits);
        }
        Ok(Command::Press(digits))
    }
}

/// How a command run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandResult {
    /// Every digit accepted and the puzzle solved
    Solved,
    /// Every digit accepted, more remain
    Accepted,
    /// A wrong digit stopped the run
    Struck,
    /// Submitted before the submission phase; one button was pressed
    TooEarly,
}

/// Result of executing a command
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub result: CommandResult,
    /// Digits pressed, including the one that struck
    pub pressed: usize,
    /// Correct digits entered after the run
    pub entered: usize,
    pub events: Vec<PuzzleEvent>,
}

/// Run a parsed command against the puzzle.
///
/// An early submission presses one random button so the strike still goes
/// through the controller.
pub fn execute<R: Rng + ?Sized>(
    puzzle: &mut Puzzle,
    command: &Command,
    rng: &mut R,
) -> Result<CommandOutcome, CommandError> {
    let Command::Press(digits) = command;
    let state = puzzle.controller().state();

    if !state.ready_to_submit() {
        let events = puzzle.press_button(rng.random_range(0..SLOT_COUNT))?;
        log::info!("[Recall #{}] Remote submission arrived early", puzzle.id());
        return Ok(CommandOutcome {
            result: CommandResult::TooEarly,
            pressed: 1,
            entered: puzzle.controller().state().entered_count,
            events,
        });
    }

    let remaining = puzzle.controller().remaining();
    if digits.len() > remaining {
        return Err(CommandError::TooManyDigits {
            given: digits.len(),
            remaining,
        });
    }

    let mut events = Vec::new();
    let mut pressed = 0;
    let mut result = CommandResult::Accepted;

    for &digit in digits {
        let step = puzzle.press(digit)?;
        pressed += 1;
        let struck = step.iter().any(|e| matches!(e, PuzzleEvent::Strike(_)));
        let solved = step.contains(&PuzzleEvent::Solved);
        events.extend(step);

        if struck {
            result = CommandResult::Struck;
            break;
        }
        if solved {
            result = CommandResult::Solved;
            break;
        }
    }

    Ok(CommandOutcome {
        result,
        pressed,
        entered: puzzle.controller().state().entered_count,
        events,
    })
}

/// Enter every remaining answer.
///
/// Returns `None` while the puzzle is not yet accepting digits, so the host
/// can retry on a later poll.
pub fn force_solve(puzzle: &mut Puzzle) -> Result<Option<Vec<PuzzleEvent>>, CommandError> {
    match puzzle.controller().state().phase {
        Phase::Inactive | Phase::Running { .. } => return Ok(None),
        Phase::Solved => return Ok(Some(Vec::new())),
        Phase::Submitting => {}
    }

    let controller = puzzle.controller();
    let pending: Vec<u8> = controller.sequence().answers[controller.state().entered_count..].to_vec();

    let mut events = Vec::new();
    for digit in pending {
        events.extend(puzzle.press(digit)?);
    }
    Ok(Some(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgework::Edgework;
    use crate::settings::Settings;
    use crate::sim::StrikeReason;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn puzzle(stages: i64) -> Puzzle {
        let mut rng = Pcg32::seed_from_u64(77);
        let settings = Settings {
            stage_count_override: Some(stages),
            log_diagnostics: false,
            ..Default::default()
        };
        let edgework = Edgework {
            serial: "QX5RT2".to_string(),
            ..Default::default()
        };
        Puzzle::setup(&edgework, &settings, &mut rng).unwrap()
    }

    fn submitting(stages: i64) -> Puzzle {
        let mut p = puzzle(stages);
        p.activate();
        p.observe_progress(stages as usize);
        p
    }

    fn wrong(digit: u8) -> u8 {
        (digit + 1) % 10
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Command::parse("press 123 45").unwrap(),
            Command::Press(vec![1, 2, 3, 4, 5])
        );
        assert_eq!(
            Command::parse("  SUBMIT   0909 ").unwrap(),
            Command::Press(vec![0, 9, 0, 9])
        );
        assert!(matches!(
            Command::parse("press"),
            Err(CommandError::MissingDigits)
        ));
        assert!(matches!(
            Command::parse("press 12a"),
            Err(CommandError::InvalidCharacter('a'))
        ));
        assert!(matches!(
            Command::parse("solve 12"),
            Err(CommandError::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse(""),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_early_submission_strikes_once() {
        let mut p = puzzle(3);
        p.activate();
        let mut rng = Pcg32::seed_from_u64(1);
        let outcome = execute(&mut p, &Command::Press(vec![1, 2, 3]), &mut rng).unwrap();
        assert_eq!(outcome.result, CommandResult::TooEarly);
        assert_eq!(outcome.pressed, 1);
        assert_eq!(
            outcome.events,
            vec![PuzzleEvent::Strike(StrikeReason::NotReady)]
        );
    }

    #[test]
    fn test_too_many_digits() {
        let mut p = submitting(2);
        let mut rng = Pcg32::seed_from_u64(1);
        let err = execute(&mut p, &Command::Press(vec![1, 2, 3]), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            CommandError::TooManyDigits { given: 3, remaining: 2 }
        ));
        assert_eq!(p.controller().state().entered_count, 0);
    }

    #[test]
    fn test_correct_command_solves() {
        let mut p = submitting(6);
        let answers = p.controller().sequence().answers.clone();
        let mut rng = Pcg32::seed_from_u64(1);

        let first = execute(&mut p, &Command::Press(answers[..4].to_vec()), &mut rng).unwrap();
        assert_eq!(first.result, CommandResult::Accepted);
        assert_eq!(first.entered, 4);

        let rest = execute(&mut p, &Command::Press(answers[4..].to_vec()), &mut rng).unwrap();
        assert_eq!(rest.result, CommandResult::Solved);
        assert!(p.controller().state().solved());
    }

    #[test]
    fn test_wrong_digit_stops_run() {
        let mut p = submitting(5);
        let answers = p.controller().sequence().answers.clone();
        let mut rng = Pcg32::seed_from_u64(1);
        let digits = vec![answers[0], wrong(answers[1]), answers[2]];
        let outcome = execute(&mut p, &Command::Press(digits), &mut rng).unwrap();
        assert_eq!(outcome.result, CommandResult::Struck);
        assert_eq!(outcome.pressed, 2);
        assert_eq!(outcome.entered, 1);
        assert_eq!(
            outcome.events.last(),
            Some(&PuzzleEvent::StageRevealed { stage: 1, hint: true })
        );
    }

    #[test]
    fn test_force_solve_waits_then_solves() {
        let mut p = puzzle(4);
        assert!(force_solve(&mut p).unwrap().is_none());
        p.activate();
        assert!(force_solve(&mut p).unwrap().is_none());
        p.observe_progress(4);
        let first = p.controller().sequence().answers[0];
        p.press(first).unwrap();

        let events = force_solve(&mut p).unwrap().unwrap();
        assert_eq!(events.last(), Some(&PuzzleEvent::Solved));
        assert!(!events.iter().any(|e| matches!(e, PuzzleEvent::Strike(_))));
        assert_eq!(force_solve(&mut p).unwrap(), Some(Vec::new()));
    }
}
