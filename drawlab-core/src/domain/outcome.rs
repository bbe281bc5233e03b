//! Outcome — the 38-symbol draw alphabet.
//!
//! The alphabet is the numbers 1..=36 plus the two zero variants `0` and
//! `00`. Internally an outcome is a single `u8` index; labels, colors and
//! board groups come from one canonical lookup table. Natural sort order is
//! `0 < 00 < 1 < … < 36` and every deterministic tie-break in the crate
//! uses it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::groups::Sector;

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 38;

/// Canonical label table, indexed by `Outcome::index()`.
const LABELS: [&str; ALPHABET_SIZE] = [
    "0", "00", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15",
    "16", "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31",
    "32", "33", "34", "35", "36",
];

/// Wheel color of an outcome (standard American layout over 0..36 + 00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Black,
    Green,
}

/// Red numbers on the standard layout; everything else in 1..=36 is black.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// One symbol of the draw alphabet.
///
/// `Ord` follows the natural label order `0 < 00 < 1 < … < 36`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Outcome(u8);

/// Error parsing an outcome label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown outcome label '{0}'")]
pub struct ParseOutcomeError(pub String);

impl Outcome {
    /// The single-zero outcome.
    pub const ZERO: Outcome = Outcome(0);
    /// The double-zero outcome.
    pub const DOUBLE_ZERO: Outcome = Outcome(1);

    /// Outcome for a number 1..=36.
    pub fn number(n: u8) -> Option<Outcome> {
        if (1..=36).contains(&n) {
            Some(Outcome(n + 1))
        } else {
            None
        }
    }

    /// Position in the natural sort order, `0..ALPHABET_SIZE`.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Outcome at the given natural-order position.
    pub fn from_index(index: usize) -> Option<Outcome> {
        if index < ALPHABET_SIZE {
            Some(Outcome(index as u8))
        } else {
            None
        }
    }

    /// The numeric value, `None` for the zero variants.
    pub fn value(self) -> Option<u8> {
        if self.0 >= 2 {
            Some(self.0 - 1)
        } else {
            None
        }
    }

    /// Canonical display label (`"0"`, `"00"`, `"1"`…`"36"`).
    pub fn label(self) -> &'static str {
        LABELS[self.index()]
    }

    /// Wheel color.
    pub fn color(self) -> Color {
        match self.value() {
            None => Color::Green,
            Some(n) if RED_NUMBERS.contains(&n) => Color::Red,
            Some(_) => Color::Black,
        }
    }

    /// The sector this outcome belongs to (disjoint cover of the alphabet).
    pub fn sector(self) -> Sector {
        Sector::of(self)
    }

    /// All outcomes in natural sort order.
    pub fn all() -> impl Iterator<Item = Outcome> {
        (0..ALPHABET_SIZE as u8).map(Outcome)
    }
}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    /// Parses a label. Leading zeros are tolerated (`"07"` ⇒ `7`), `"00"`
    /// is the double zero, anything outside the alphabet is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "00" {
            return Ok(Outcome::DOUBLE_ZERO);
        }
        match trimmed.parse::<u8>() {
            Ok(0) => Ok(Outcome::ZERO),
            Ok(n) => Outcome::number(n).ok_or_else(|| ParseOutcomeError(s.to_string())),
            Err(_) => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_labels() {
        for outcome in Outcome::all() {
            assert_eq!(outcome.label().parse::<Outcome>().unwrap(), outcome);
        }
    }

    #[test]
    fn zero_variants_are_distinct() {
        assert_ne!(Outcome::ZERO, Outcome::DOUBLE_ZERO);
        assert_eq!("0".parse::<Outcome>().unwrap(), Outcome::ZERO);
        assert_eq!("00".parse::<Outcome>().unwrap(), Outcome::DOUBLE_ZERO);
    }

    #[test]
    fn leading_zeros_tolerated() {
        assert_eq!("07".parse::<Outcome>().unwrap(), Outcome::number(7).unwrap());
        assert_eq!("036".parse::<Outcome>().unwrap(), Outcome::number(36).unwrap());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("37".parse::<Outcome>().is_err());
        assert!("75".parse::<Outcome>().is_err());
        assert!("banana".parse::<Outcome>().is_err());
        assert!("-1".parse::<Outcome>().is_err());
    }

    #[test]
    fn natural_order() {
        let zero = Outcome::ZERO;
        let double = Outcome::DOUBLE_ZERO;
        let one = Outcome::number(1).unwrap();
        let thirty_six = Outcome::number(36).unwrap();
        assert!(zero < double);
        assert!(double < one);
        assert!(one < thirty_six);
    }

    #[test]
    fn zeros_are_green() {
        assert_eq!(Outcome::ZERO.color(), Color::Green);
        assert_eq!(Outcome::DOUBLE_ZERO.color(), Color::Green);
        assert_eq!(Outcome::number(1).unwrap().color(), Color::Red);
        assert_eq!(Outcome::number(2).unwrap().color(), Color::Black);
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Outcome::DOUBLE_ZERO).unwrap();
        assert_eq!(json, "\"00\"");
        let back: Outcome = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(back, Outcome::number(17).unwrap());
    }

    #[test]
    fn alphabet_is_complete() {
        assert_eq!(Outcome::all().count(), ALPHABET_SIZE);
        assert_eq!(LABELS.len(), ALPHABET_SIZE);
    }
}
