//! Constant assignment
//!
//! Maps the ten constants onto the ten slots from the edgework alone:
//! - Slots 0-5 follow the serial characters, each claiming the next free value
//! - Slots 6-9 take the four leftovers, reordered by the first matching rule

use serde::Serialize;

use super::catalog::{CONSTANT_COUNT, Constant, ConstantKind};
use crate::edgework::{Edgework, Port};
use crate::error::PuzzleError;

/// Number of values left after the serial pass
pub const LEFTOVER_COUNT: usize = 4;

/// One entry of the ordering rule table
pub struct OrderRule {
    pub applies: fn(&Edgework) -> bool,
    pub order: [usize; LEFTOVER_COUNT],
    pub description: &'static str,
}

/// Ordering rules, checked top to bottom; the first match wins.
/// The last rule always applies.
pub const ORDER_RULES: [OrderRule; 14] = [
    OrderRule {
        applies: |e| e.has_port(Port::Parallel) && e.is_indicator_lit("BOB"),
        order: [0, 1, 2, 3],
        description: "Parallel port and a lit BOB indicator present",
    },
    OrderRule {
        applies: |e| e.battery_count() > 5,
        order: [3, 2, 1, 0],
        description: "More than 5 batteries present",
    },
    OrderRule {
        applies: |e| e.indicator_count() > 3,
        order: [0, 3, 2, 1],
        description: "More than 3 indicators present",
    },
    OrderRule {
        applies: |e| e.port_count() == 0,
        order: [1, 3, 2, 0],
        description: "No ports are present",
    },
    OrderRule {
        applies: |e| e.battery_count() == 0,
        order: [2, 1, 3, 0],
        description: "No batteries are present",
    },
    OrderRule {
        applies: |e| e.serial_digit_count() == 4,
        order: [1, 0, 3, 2],
        description: "Exactly 4 digits in the serial number present",
    },
    OrderRule {
        applies: |e| e.module_count() > 11 && e.module_count() < 47,
        order: [3, 0, 1, 2],
        description: "Number of modules present are greater than 11, but less than 47",
    },
    OrderRule {
        applies: |e| e.serial_has_vowel(),
        order: [2, 0, 3, 1],
        description: "Vowel in the serial number present",
    },
    OrderRule {
        applies: |e| e.has_empty_port_plate(),
        order: [1, 2, 0, 3],
        description: "Empty port plate present",
    },
    OrderRule {
        applies: |e| e.distinct_port_kinds() == Port::KIND_COUNT,
        order: [3, 1, 2, 0],
        description: "All port types are present",
    },
    OrderRule {
        applies: |e| e.lit_indicator_count() > e.unlit_indicator_count(),
        order: [0, 3, 1, 2],
        description: "There are more lit than unlit indicators present",
    },
    OrderRule {
        applies: |e| e.serial_digit_at(5).is_some_and(|d| d % 2 == 0),
        order: [2, 1, 0, 3],
        description: "Sixth character of the serial number is even",
    },
    OrderRule {
        applies: |e| e.serial_digit_at(2).is_some_and(|d| d % 2 != 0),
        order: [2, 3, 0, 1],
        description: "Third character of the serial number is odd",
    },
    OrderRule {
        applies: |_| true,
        order: [1, 0, 2, 3],
        description: "No conditions applied",
    },
];

/// Index of the first rule that applies to this edgework
pub fn select_rule(edgework: &Edgework) -> usize {
    ORDER_RULES
        .iter()
        .position(|rule| (rule.applies)(edgework))
        .unwrap_or(ORDER_RULES.len() - 1)
}

/// Constants laid out across the ten slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    slots: [Constant; CONSTANT_COUNT],
    rule_index: usize,
}

impl Assignment {
    pub fn slots(&self) -> &[Constant; CONSTANT_COUNT] {
        &self.slots
    }

    pub fn constant(&self, slot: usize) -> &Constant {
        &self.slots[slot]
    }

    /// Slot holding the given kind
    pub fn slot_of(&self, kind: ConstantKind) -> Option<usize> {
        self.slots.iter().position(|c| c.kind == kind)
    }

    /// Index of the ordering rule that placed slots 6-9
    pub fn rule_index(&self) -> usize {
        self.rule_index
    }

    pub fn rule_description(&self) -> &'static str {
        ORDER_RULES[self.rule_index].description
    }

    /// Kinds in slot order
    pub fn kinds(&self) -> [ConstantKind; CONSTANT_COUNT] {
        self.slots.map(|c| c.kind)
    }
}

/// Button label for a slot: slots 0-8 read 1-9, slot 9 reads 0
pub fn slot_label(slot: usize) -> u8 {
    ((slot + 1) % 10) as u8
}

/// Serializable summary of an assignment
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    pub kinds: Vec<ConstantKind>,
    pub rule_index: usize,
    pub rule: &'static str,
}

impl From<&Assignment> for AssignmentSummary {
    fn from(assignment: &Assignment) -> Self {
        Self {
            kinds: assignment.kinds().to_vec(),
            rule_index: assignment.rule_index,
            rule: assignment.rule_description(),
        }
    }
}

/// Claim the first free value reached by stepping `value` up modulo 10.
///
/// The raw value is tested before any step, so letter values (10-26) are
/// stepped once before being reduced.
fn claim(available: &mut [bool; CONSTANT_COUNT], mut value: u8) -> u8 {
    while !available.get(value as usize).copied().unwrap_or(false) {
        value = (value + 1) % CONSTANT_COUNT as u8;
    }
    available[value as usize] = false;
    value
}

/// Assign constants to slots from the edgework
pub fn assign(edgework: &Edgework) -> Result<Assignment, PuzzleError> {
    edgework.validate()?;

    let mut available = [true; CONSTANT_COUNT];
    let mut ids = Vec::with_capacity(CONSTANT_COUNT);

    let values = edgework
        .serial_values()
        .ok_or_else(|| PuzzleError::InvalidSerial(edgework.serial.clone()))?;
    for value in values {
        ids.push(claim(&mut available, value));
    }

    let leftovers: Vec<u8> = (0..CONSTANT_COUNT as u8)
        .filter(|v| available[*v as usize])
        .collect();
    if leftovers.len() != LEFTOVER_COUNT {
        return Err(PuzzleError::InvalidSerial(edgework.serial.clone()));
    }

    let rule_index = select_rule(edgework);
    ids.extend(ORDER_RULES[rule_index].order.iter().map(|&i| leftovers[i]));

    let constants = ids
        .into_iter()
        .map(Constant::from_index)
        .collect::<Result<Vec<_>, _>>()?;
    let slots: [Constant; CONSTANT_COUNT] = constants
        .try_into()
        .map_err(|_| PuzzleError::InvalidSerial(edgework.serial.clone()))?;

    Ok(Assignment { slots, rule_index })
}
