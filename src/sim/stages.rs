//! Stage generation
//!
//! Rolls one digit per stage against a randomly chosen slot, shuffles the
//! result and derives the expected answer for each position.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::assign::Assignment;
use super::catalog::{CONSTANT_COUNT, ConstantKind};

/// Digit offsets wrap at this modulus when computing answers
pub const ANSWER_DIGIT_MODULUS: usize = 100;

/// One stage: a rolled digit paired with an assigned slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Slot index into the assignment
    pub slot: usize,
    /// Constant held by that slot
    pub kind: ConstantKind,
    /// Rolled value (0-9)
    pub rolled: u8,
}

/// Generated stages with their expected answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSequence {
    pub stages: Vec<Stage>,
    pub answers: Vec<u8>,
}

impl StageSequence {
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Answer digits in groups of three, comma separated
    pub fn grouped_answers(&self) -> String {
        self.answers
            .chunks(3)
            .map(|group| group.iter().map(|d| char::from(b'0' + d)).collect::<String>())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Expected answer for the stage at `position`
pub fn answer_for(assignment: &Assignment, stage: &Stage, position: usize) -> u8 {
    let digit = assignment
        .constant(stage.slot)
        .digit(position % ANSWER_DIGIT_MODULUS);
    (stage.rolled + digit) % 10
}

/// Generate `stage_count` stages from the assignment.
///
/// Slots are drawn with replacement. The same rng stream always yields the
/// same sequence.
pub fn generate_stages<R: Rng + ?Sized>(
    assignment: &Assignment,
    stage_count: usize,
    rng: &mut R,
) -> StageSequence {
    let mut stages: Vec<Stage> = (0..stage_count)
        .map(|_| {
            let slot = rng.random_range(0..CONSTANT_COUNT);
            let rolled = rng.random_range(0..10u8);
            Stage {
                slot,
                kind: assignment.constant(slot).kind,
                rolled,
            }
        })
        .collect();
    stages.shuffle(rng);

    let answers = stages
        .iter()
        .enumerate()
        .map(|(i, stage)| answer_for(assignment, stage, i))
        .collect();

    StageSequence { stages, answers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgework::Edgework;
    use crate::sim::assign::assign;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assignment() -> Assignment {
        let e = Edgework {
            serial: "KT4NE8".to_string(),
            ..Default::default()
        };
        assign(&e).unwrap()
    }

    #[test]
    fn test_empty_sequence() {
        let mut rng = Pcg32::seed_from_u64(1);
        let seq = generate_stages(&assignment(), 0, &mut rng);
        assert!(seq.is_empty());
        assert!(seq.answers.is_empty());
        assert_eq!(seq.grouped_answers(), "");
    }

    #[test]
    fn test_determinism() {
        let a = assignment();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let s1 = generate_stages(&a, 40, &mut rng1);
        let s2 = generate_stages(&a, 40, &mut rng2);
        assert_eq!(s1, s2);

        let mut rng3 = Pcg32::seed_from_u64(12345);
        let s3 = generate_stages(&a, 40, &mut rng3);
        assert_ne!(s1.stages, s3.stages);
    }

    #[test]
    fn test_stage_kind_matches_slot() {
        let a = assignment();
        let mut rng = Pcg32::seed_from_u64(7);
        let seq = generate_stages(&a, 25, &mut rng);
        for stage in &seq.stages {
            assert_eq!(a.constant(stage.slot).kind, stage.kind);
            assert_eq!(a.slot_of(stage.kind), Some(stage.slot));
            assert!(stage.rolled <= 9);
        }
    }

    #[test]
    fn test_answer_wraps_digit_offset_at_100() {
        let a = assignment();
        let stage = Stage {
            slot: 0,
            kind: a.constant(0).kind,
            rolled: 4,
        };
        let expected = (4 + a.constant(0).digit(3)) % 10;
        assert_eq!(answer_for(&a, &stage, 103), expected);
        assert_eq!(answer_for(&a, &stage, 3), expected);
    }

    #[test]
    fn test_grouped_answers() {
        let seq = StageSequence {
            stages: Vec::new(),
            answers: vec![3, 7, 2, 0, 1, 9, 5],
        };
        assert_eq!(seq.grouped_answers(), "372,019,5");
    }

    proptest! {
        #[test]
        fn prop_answers_follow_formula(seed in any::<u64>(), count in 0usize..150) {
            let a = assignment();
            let mut rng = Pcg32::seed_from_u64(seed);
            let seq = generate_stages(&a, count, &mut rng);
            prop_assert_eq!(seq.len(), count);
            prop_assert_eq!(seq.answers.len(), count);
            for (i, stage) in seq.stages.iter().enumerate() {
                let digit = a.constant(stage.slot).digit(i % 100);
                prop_assert_eq!(seq.answers[i], (stage.rolled + digit) % 10);
                prop_assert!(seq.answers[i] <= 9);
            }
        }
    }
}
