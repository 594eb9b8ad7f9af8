//! Constant catalog
//!
//! Ten named constants, each with a fixed table of fractional digits.
//! Pure lookup data, no logic.

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Number of constants (and slots)
pub const CONSTANT_COUNT: usize = 10;

/// Number of fractional digits stored per constant
pub const EXPANSION_LEN: usize = 100;

/// Constant identifiers, enumerable 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConstantKind {
    Pi = 0,
    E = 1,
    Sqrt2 = 2,
    Ln2 = 3,
    /// Golden ratio
    Phi = 4,
    EulerMascheroni = 5,
    Plastic = 6,
    Feigenbaum = 7,
    Conway = 8,
    /// Omega constant, W(1)
    LambertW1 = 9,
}

impl ConstantKind {
    /// All kinds in numeric order
    pub const ALL: [ConstantKind; CONSTANT_COUNT] = [
        ConstantKind::Pi,
        ConstantKind::E,
        ConstantKind::Sqrt2,
        ConstantKind::Ln2,
        ConstantKind::Phi,
        ConstantKind::EulerMascheroni,
        ConstantKind::Plastic,
        ConstantKind::Feigenbaum,
        ConstantKind::Conway,
        ConstantKind::LambertW1,
    ];

    /// Look up a kind by its numeric id.
    ///
    /// An id outside 0-9 means the assignment tables are corrupt, so this
    /// fails instead of picking a fallback.
    pub fn from_index(index: u8) -> Result<Self, PuzzleError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(PuzzleError::UnknownConstant(index))
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Short symbol used in diagnostics
    pub fn symbol(self) -> &'static str {
        match self {
            ConstantKind::Pi => "π",
            ConstantKind::E => "e",
            ConstantKind::Sqrt2 => "√2",
            ConstantKind::Ln2 => "ln2",
            ConstantKind::Phi => "φ",
            ConstantKind::EulerMascheroni => "γ",
            ConstantKind::Plastic => "ρ",
            ConstantKind::Feigenbaum => "δ",
            ConstantKind::Conway => "λ",
            ConstantKind::LambertW1 => "W(1)",
        }
    }

    /// Fractional digits as ASCII
    fn digit_table(self) -> &'static [u8; EXPANSION_LEN] {
        match self {
            ConstantKind::Pi => b"1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679",
            ConstantKind::E => b"7182818284590452353602874713526624977572470936999595749669676277240766303535475945713821785251664274",
            ConstantKind::Sqrt2 => b"4142135623730950488016887242096980785696718753769480731766797379907324784621070388503875343276415727",
            ConstantKind::Ln2 => b"6931471805599453094172321214581765680755001343602552541206800094933936219696947156058633269964186875",
            ConstantKind::Phi => b"6180339887498948482045868343656381177203091798057628621354486227052604628189024497072072041893911374",
            ConstantKind::EulerMascheroni => b"5772156649015328606065120900824024310421593359399235988057672348848628161332625388471532653213384543",
            ConstantKind::Plastic => b"3247179572447460259609088544780973407344040569017333647511773196849943330457981735351419943227460373",
            ConstantKind::Feigenbaum => b"6692016091029906718532038204662016172581855774757686327456513430046430596155893079608658315461735027",
            ConstantKind::Conway => b"3035772690342963912570991121525518907307025046597086782995734358261341345935722034301986265121843828",
            ConstantKind::LambertW1 => b"5671432904097840003294836545880241725504396327895736206961023466748606876187663252409701835347037716",
        }
    }
}

impl std::fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A constant and its digit expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    pub kind: ConstantKind,
    digits: &'static [u8; EXPANSION_LEN],
}

impl Constant {
    pub fn new(kind: ConstantKind) -> Self {
        Self {
            kind,
            digits: kind.digit_table(),
        }
    }

    /// Build the constant for a numeric id, failing on unknown ids
    pub fn from_index(index: u8) -> Result<Self, PuzzleError> {
        ConstantKind::from_index(index).map(Self::new)
    }

    /// Fractional digit at `offset` (0 = first digit after the point)
    #[inline]
    pub fn digit(&self, offset: usize) -> u8 {
        self.digits[offset % EXPANSION_LEN] - b'0'
    }

    /// Iterate all stored digits as values 0-9
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.digits.iter().map(|d| d - b'0')
    }
}
