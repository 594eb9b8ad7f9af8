//! Host environment facts ("edgework")
//!
//! Everything the constant assignment reads from the host: serial code,
//! batteries, indicators, port plates and the module list. Loaded once at
//! setup and never mutated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Length of a serial code
pub const SERIAL_LEN: usize = 6;

/// Port types that can appear on a port plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    DviD,
    Parallel,
    Ps2,
    Rj45,
    Serial,
    StereoRca,
}

impl Port {
    /// Number of distinct port types
    pub const KIND_COUNT: usize = 6;
}

/// An indicator light with its three-letter label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    pub lit: bool,
}

impl Indicator {
    pub fn new(label: &str, lit: bool) -> Self {
        Self {
            label: label.to_string(),
            lit,
        }
    }
}

/// A module present in the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    /// Needy modules are present but never solvable
    #[serde(default = "default_solvable")]
    pub solvable: bool,
}

fn default_solvable() -> bool {
    true
}

impl ModuleEntry {
    pub fn solvable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            solvable: true,
        }
    }

    pub fn needy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            solvable: false,
        }
    }
}

/// Environment facts consumed by the constant assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edgework {
    pub serial: String,
    #[serde(default)]
    pub batteries: u32,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    /// Each plate lists the ports mounted on it (may be empty)
    #[serde(default)]
    pub port_plates: Vec<Vec<Port>>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

impl Edgework {
    /// Check the serial code shape: six uppercase ASCII alphanumerics with
    /// numeric third and sixth characters.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let bytes = self.serial.as_bytes();
        let shape_ok = bytes.len() == SERIAL_LEN
            && bytes
                .iter()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
        if !shape_ok || !bytes[2].is_ascii_digit() || !bytes[5].is_ascii_digit() {
            return Err(PuzzleError::InvalidSerial(self.serial.clone()));
        }
        Ok(())
    }

    /// Serial characters mapped to numbers: digits as-is, letters A=1 .. Z=26.
    /// `None` if any character is neither.
    pub fn serial_values(&self) -> Option<Vec<u8>> {
        self.serial
            .bytes()
            .map(|b| match b.to_ascii_uppercase() {
                d @ b'0'..=b'9' => Some(d - b'0'),
                l @ b'A'..=b'Z' => Some(l - b'A' + 1),
                _ => None,
            })
            .collect()
    }

    /// Numeric value of the serial character at `position` (0-based), if it is a digit
    pub fn serial_digit_at(&self, position: usize) -> Option<u8> {
        self.serial
            .as_bytes()
            .get(position)
            .filter(|b| b.is_ascii_digit())
            .map(|b| b - b'0')
    }

    /// Count of numeric characters in the serial
    pub fn serial_digit_count(&self) -> usize {
        self.serial.bytes().filter(u8::is_ascii_digit).count()
    }

    pub fn serial_has_vowel(&self) -> bool {
        self.serial
            .chars()
            .any(|c| matches!(c.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U'))
    }

    pub fn battery_count(&self) -> u32 {
        self.batteries
    }

    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    pub fn lit_indicator_count(&self) -> usize {
        self.indicators.iter().filter(|i| i.lit).count()
    }

    pub fn unlit_indicator_count(&self) -> usize {
        self.indicators.iter().filter(|i| !i.lit).count()
    }

    /// Whether an indicator with this label is present and lit
    pub fn is_indicator_lit(&self, label: &str) -> bool {
        self.indicators.iter().any(|i| i.lit && i.label == label)
    }

    pub fn port_count(&self) -> usize {
        self.port_plates.iter().map(Vec::len).sum()
    }

    pub fn has_port(&self, port: Port) -> bool {
        self.port_plates.iter().flatten().any(|p| *p == port)
    }

    pub fn distinct_port_kinds(&self) -> usize {
        self.port_plates
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn has_empty_port_plate(&self) -> bool {
        self.port_plates.iter().any(Vec::is_empty)
    }

    /// Total modules present, solvable or not
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Names of solvable modules
    pub fn solvable_module_names(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .filter(|m| m.solvable)
            .map(|m| m.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Edgework {
        Edgework {
            serial: "AB3CD7".to_string(),
            batteries: 2,
            indicators: vec![Indicator::new("BOB", true), Indicator::new("FRK", false)],
            port_plates: vec![vec![Port::Parallel, Port::Serial], vec![], vec![Port::Serial]],
            modules: vec![
                ModuleEntry::solvable("Wires"),
                ModuleEntry::needy("Venting Gas"),
            ],
        }
    }

    #[test]
    fn test_serial_values() {
        let e = sample();
        assert_eq!(e.serial_values(), Some(vec![1, 2, 3, 3, 4, 7]));
        let z = Edgework {
            serial: "ZZ0ZZ9".to_string(),
            ..Default::default()
        };
        assert_eq!(z.serial_values(), Some(vec![26, 26, 0, 26, 26, 9]));
    }

    #[test]
    fn test_serial_values_reject_symbols() {
        for bad in ["AB-CD7", "AB3CD@", "AB 3CD"] {
            let e = Edgework {
                serial: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(e.serial_values(), None, "{bad}");
        }
        let lower = Edgework {
            serial: "ab3cd7".to_string(),
            ..Default::default()
        };
        assert_eq!(lower.serial_values(), Some(vec![1, 2, 3, 3, 4, 7]));
    }

    #[test]
    fn test_derived_facts() {
        let e = sample();
        assert_eq!(e.serial_digit_count(), 2);
        assert!(e.serial_has_vowel());
        assert_eq!(e.port_count(), 3);
        assert_eq!(e.distinct_port_kinds(), 2);
        assert!(e.has_empty_port_plate());
        assert!(e.has_port(Port::Parallel));
        assert!(!e.has_port(Port::Rj45));
        assert!(e.is_indicator_lit("BOB"));
        assert!(!e.is_indicator_lit("FRK"));
        assert_eq!(e.lit_indicator_count(), 1);
        assert_eq!(e.unlit_indicator_count(), 1);
        assert_eq!(e.module_count(), 2);
        assert_eq!(e.solvable_module_names().collect::<Vec<_>>(), vec!["Wires"]);
        assert_eq!(e.serial_digit_at(2), Some(3));
        assert_eq!(e.serial_digit_at(0), None);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());
        for bad in ["AB3CD", "AB3CDX", "ABCCD7", "ab3cd7", "AB3C-7"] {
            let e = Edgework {
                serial: bad.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(e.validate(), Err(PuzzleError::InvalidSerial(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "serial": "KT4NE8",
            "port_plates": [["DviD"], []],
            "modules": [{"name": "Wires"}, {"name": "Knob", "solvable": false}]
        }"#;
        let e: Edgework = serde_json::from_str(json).unwrap();
        assert_eq!(e.batteries, 0);
        assert_eq!(e.port_count(), 1);
        assert!(e.modules[0].solvable);
        assert!(!e.modules[1].solvable);
    }
}
