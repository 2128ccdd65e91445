//! Seat identifiers: aisle letter plus row number

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Seat column. `A`/`B` sit left of the aisle, `C`/`D` right of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeatLetter {
    A,
    B,
    C,
    D,
}

impl SeatLetter {
    /// All columns, left to right.
    pub const ALL: [SeatLetter; 4] = [SeatLetter::A, SeatLetter::B, SeatLetter::C, SeatLetter::D];

    pub fn as_char(self) -> char {
        match self {
            SeatLetter::A => 'A',
            SeatLetter::B => 'B',
            SeatLetter::C => 'C',
            SeatLetter::D => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(SeatLetter::A),
            'B' => Some(SeatLetter::B),
            'C' => Some(SeatLetter::C),
            'D' => Some(SeatLetter::D),
            _ => None,
        }
    }
}

impl fmt::Display for SeatLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A seat on the bus, e.g. `C12`.
///
/// Rows are numbered from the entrance: row 1 is at the front, the highest
/// row is at the rear. Ordering is row-major (row first, then letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u32,
    letter: SeatLetter,
}

fn seat_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Z])([0-9]+)$").expect("valid seat pattern"))
}

impl SeatId {
    /// Create a seat. Row must be positive.
    pub fn new(letter: SeatLetter, row: u32) -> DomainResult<Self> {
        if row == 0 {
            return Err(DomainError::InvalidSeat {
                input: format!("{}{}", letter, row),
                reason: "row must be a positive integer".into(),
            });
        }
        Ok(Self { row, letter })
    }

    /// Parse the textual form `<letter><row>`.
    ///
    /// The letter must be one of `A`..`D`; the row must be a positive decimal
    /// integer. Leading zeros are tolerated (`A05` is row 5).
    pub fn parse(input: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidSeat {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let caps = seat_pattern()
            .captures(input)
            .ok_or_else(|| invalid("expected a letter A-D followed by a row number"))?;

        let letter = caps[1]
            .chars()
            .next()
            .and_then(SeatLetter::from_char)
            .ok_or_else(|| invalid("seat letter must be one of A, B, C, D"))?;

        let row: u32 = caps[2]
            .parse()
            .map_err(|_| invalid("row number out of range"))?;
        if row == 0 {
            return Err(invalid("row must be a positive integer"));
        }

        Ok(Self { row, letter })
    }

    pub fn letter(&self) -> SeatLetter {
        self.letter
    }

    pub fn row(&self) -> u32 {
        self.row
    }
}

impl Ord for SeatId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.letter).cmp(&(other.row, other.letter))
    }
}

impl PartialOrd for SeatId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.row)
    }
}

impl FromStr for SeatId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SeatId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_c12_when_parsing_then_yields_letter_and_row() {
        let seat = SeatId::parse("C12").unwrap();
        assert_eq!(seat.letter(), SeatLetter::C);
        assert_eq!(seat.row(), 12);
        assert_eq!(seat.to_string(), "C12");
    }

    #[test]
    fn given_leading_zero_when_parsing_then_formats_canonically() {
        let seat = SeatId::parse("A05").unwrap();
        assert_eq!(seat.row(), 5);
        assert_eq!(seat.to_string(), "A5");
    }

    #[test]
    fn given_row_zero_when_creating_then_rejected() {
        assert!(SeatId::new(SeatLetter::B, 0).is_err());
        assert!(SeatId::parse("B0").is_err());
    }

    #[test]
    fn given_letter_outside_layout_when_parsing_then_reports_letter() {
        let err = SeatId::parse("E3").unwrap_err();
        match err {
            DomainError::InvalidSeat { input, reason } => {
                assert_eq!(input, "E3");
                assert!(reason.contains("A, B, C, D"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_seats_when_sorting_then_row_major() {
        let mut seats: Vec<SeatId> = ["D2", "A10", "B2", "C1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        seats.sort();
        let rendered: Vec<String> = seats.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["C1", "B2", "D2", "A10"]);
    }

    #[test]
    fn given_seat_when_serialized_then_uses_text_form() {
        let seat = SeatId::parse("D7").unwrap();
        let json = serde_json::to_string(&seat).unwrap();
        assert_eq!(json, "\"D7\"");
        let back: SeatId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seat);
    }

    #[test]
    fn given_malformed_seat_in_json_when_deserializing_then_fails() {
        let result: Result<SeatId, _> = serde_json::from_str("\"row7\"");
        assert!(result.is_err());
    }
}
