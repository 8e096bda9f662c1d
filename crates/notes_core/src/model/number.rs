//! One-based note numbers.
//!
//! # Responsibility
//! - Parse user-supplied note numbers and validate them against a store size.
//!
//! # Invariants
//! - Accepted numbers lie in `[1, count]`; the stored position is `number - 1`.
//! - Range violations always render as `Invalid note number`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

/// Fixed message for numbers outside the current store range.
pub const INVALID_NOTE_NUMBER: &str = "Invalid note number";

/// A validated note number bound to the store it was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteNumber {
    index: usize,
}

impl NoteNumber {
    /// Parses `raw` and checks it against a store holding `count` notes.
    ///
    /// # Errors
    /// - `NoteNumberError::NotANumber` when `raw` is not a decimal integer.
    /// - `NoteNumberError::OutOfRange` when the integer is not in `[1, count]`.
    pub fn parse(raw: &str, count: usize) -> Result<Self, NoteNumberError> {
        let value: i64 = raw.parse().map_err(|source| NoteNumberError::NotANumber {
            raw: raw.to_string(),
            source,
        })?;
        Self::from_one_based(value, count)
    }

    /// Validates an already-parsed one-based number.
    pub fn from_one_based(value: i64, count: usize) -> Result<Self, NoteNumberError> {
        match usize::try_from(value) {
            Ok(number) if number >= 1 && number <= count => Ok(Self { index: number - 1 }),
            _ => Err(NoteNumberError::OutOfRange(value)),
        }
    }

    /// Zero-based position in the note sequence.
    pub fn index(self) -> usize {
        self.index
    }

    /// One-based number as shown to the user.
    pub fn get(self) -> usize {
        self.index + 1
    }
}

impl Display for NoteNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Rejection reasons for a user-supplied note number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteNumberError {
    /// Input is not a decimal integer.
    NotANumber { raw: String, source: ParseIntError },
    /// Integer is zero, negative, or past the last note.
    OutOfRange(i64),
}

impl Display for NoteNumberError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber { raw, source } => {
                write!(f, "invalid note number `{raw}`: {source}")
            }
            Self::OutOfRange(_) => f.write_str(INVALID_NOTE_NUMBER),
        }
    }
}

impl Error for NoteNumberError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotANumber { source, .. } => Some(source),
            Self::OutOfRange(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteNumber, NoteNumberError, INVALID_NOTE_NUMBER};

    #[test]
    fn accepts_bounds_of_range() {
        assert_eq!(NoteNumber::parse("1", 3).unwrap().index(), 0);
        assert_eq!(NoteNumber::parse("3", 3).unwrap().index(), 2);
        assert_eq!(NoteNumber::parse("+2", 3).unwrap().get(), 2);
    }

    #[test]
    fn rejects_zero_negative_and_past_end() {
        for raw in ["0", "-1", "4", "9223372036854775807"] {
            let err = NoteNumber::parse(raw, 3).expect_err("out of range");
            assert!(matches!(err, NoteNumberError::OutOfRange(_)), "{raw}");
            assert_eq!(err.to_string(), INVALID_NOTE_NUMBER);
        }
    }

    #[test]
    fn rejects_everything_on_empty_store() {
        let err = NoteNumber::parse("1", 0).expect_err("empty store");
        assert_eq!(err, NoteNumberError::OutOfRange(1));
    }

    #[test]
    fn non_numeric_input_reports_parse_error() {
        for raw in ["abc", "", "1.5", " 1", "99999999999999999999"] {
            let err = NoteNumber::parse(raw, 3).expect_err("not a number");
            assert!(matches!(err, NoteNumberError::NotANumber { .. }), "{raw}");
        }
        let message = NoteNumber::parse("abc", 3).unwrap_err().to_string();
        assert!(message.contains("`abc`"));
    }
}
