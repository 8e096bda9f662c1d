//! Note use-case service.
//!
//! # Responsibility
//! - Run each command as one full load, in-memory transform, full save cycle.
//! - Resolve user-supplied note numbers against the freshly loaded sequence.
//!
//! # Invariants
//! - Add appends exactly one note at the end and leaves prior notes untouched.
//! - Delete removes exactly one note; later notes shift one position earlier.
//! - List and show never write the store.
//! - Mutations run inside the repository write lock.

use crate::logging::sanitize_message;
use crate::model::note::Note;
use crate::model::number::{NoteNumber, NoteNumberError};
use crate::store::{MissingStore, NoteRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::BufRead;
use std::time::Instant;

const MAX_LOGGED_ERROR_CHARS: usize = 200;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Note number is missing, not numeric, or outside the store.
    Number(NoteNumberError),
    /// Note body could not be read from the input stream.
    Input(std::io::Error),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(err) => write!(f, "{err}"),
            Self::Input(err) => write!(f, "failed to read note text: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Number(err) => Some(err),
            Self::Input(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<NoteNumberError> for NoteServiceError {
    fn from(value: NoteNumberError) -> Self {
        Self::Number(value)
    }
}

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// A note together with the number it was addressed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedNote {
    pub number: NoteNumber,
    pub note: Note,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Appends a note whose body is read from `body` until end of input.
    ///
    /// The store is decoded once before reading so a malformed file is
    /// reported without waiting on input. The append itself reloads under
    /// the write lock.
    pub fn add_note(&self, title: &str, body: impl BufRead) -> ServiceResult<Note> {
        let started_at = Instant::now();
        let result = self.add_note_inner(title, body);
        log_outcome("note_add", started_at, &result, |note| {
            format!("text_chars={}", note.text.chars().count())
        });
        result
    }

    fn add_note_inner(&self, title: &str, body: impl BufRead) -> ServiceResult<Note> {
        self.repo.load(MissingStore::Empty)?;
        let text = read_body(body)?;

        self.repo.with_write_lock(|| -> ServiceResult<Note> {
            let mut notes = self.repo.load(MissingStore::Empty)?;
            let note = Note::new(title, text);
            notes.push(note.clone());
            self.repo.save(&notes)?;
            Ok(note)
        })
    }

    /// Returns every note in insertion order. A missing store is empty.
    pub fn list_notes(&self) -> ServiceResult<Vec<Note>> {
        let started_at = Instant::now();
        let result = self
            .repo
            .load(MissingStore::Empty)
            .map_err(NoteServiceError::from);
        log_outcome("note_list", started_at, &result, |notes| {
            format!("count={}", notes.len())
        });
        result
    }

    /// Returns the note addressed by the one-based number in `raw`.
    pub fn get_note(&self, raw: &str) -> ServiceResult<NumberedNote> {
        let started_at = Instant::now();
        let result = self.get_note_inner(raw);
        log_outcome("note_show", started_at, &result, |found| {
            format!("number={}", found.number)
        });
        result
    }

    fn get_note_inner(&self, raw: &str) -> ServiceResult<NumberedNote> {
        let mut notes = self.repo.load(MissingStore::Fail)?;
        let number = NoteNumber::parse(raw, notes.len())?;
        Ok(NumberedNote {
            number,
            note: notes.swap_remove(number.index()),
        })
    }

    /// Removes the note addressed by the one-based number in `raw`.
    ///
    /// Every later note's number drops by one on the next load.
    pub fn delete_note(&self, raw: &str) -> ServiceResult<NumberedNote> {
        let started_at = Instant::now();
        let result = self.repo.with_write_lock(|| -> ServiceResult<NumberedNote> {
            let mut notes = self.repo.load(MissingStore::Fail)?;
            let number = NoteNumber::parse(raw, notes.len())?;
            let note = notes.remove(number.index());
            self.repo.save(&notes)?;
            Ok(NumberedNote { number, note })
        });
        log_outcome("note_delete", started_at, &result, |removed| {
            format!("number={}", removed.number)
        });
        result
    }
}

/// Collects all input lines and joins them with `\n`.
///
/// Line terminators (`\n` or `\r\n`) are stripped, so a trailing newline
/// before end of input does not produce a trailing empty line.
fn read_body(body: impl BufRead) -> ServiceResult<String> {
    let lines = body
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(NoteServiceError::Input)?;
    Ok(lines.join("\n"))
}

fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: &ServiceResult<T>,
    details: impl FnOnce(&T) -> String,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => info!(
            "event={event} module=service status=ok duration_ms={duration_ms} {}",
            details(value)
        ),
        Err(err) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={} error={}",
            error_code(err),
            sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
        ),
    }
}

fn error_code(err: &NoteServiceError) -> &'static str {
    match err {
        NoteServiceError::Number(NoteNumberError::NotANumber { .. }) => "number_not_numeric",
        NoteServiceError::Number(NoteNumberError::OutOfRange(_)) => "number_out_of_range",
        NoteServiceError::Input(_) => "input_read_failed",
        NoteServiceError::Repo(RepoError::Missing { .. }) => "store_missing",
        NoteServiceError::Repo(RepoError::Decode { .. }) => "store_malformed",
        NoteServiceError::Repo(RepoError::Encode(_)) => "store_encode_failed",
        NoteServiceError::Repo(RepoError::Lock { .. }) => "store_lock_failed",
        NoteServiceError::Repo(RepoError::Io { .. }) => "store_io_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::read_body;
    use std::io::Cursor;

    #[test]
    fn body_lines_are_joined_without_trailing_newline() {
        assert_eq!(read_body(Cursor::new("milk\neggs\n")).unwrap(), "milk\neggs");
        assert_eq!(read_body(Cursor::new("milk\r\neggs")).unwrap(), "milk\neggs");
    }

    #[test]
    fn blank_lines_inside_body_are_preserved() {
        assert_eq!(read_body(Cursor::new("a\n\nb\n\n")).unwrap(), "a\n\nb\n");
    }

    #[test]
    fn empty_input_gives_empty_body() {
        assert_eq!(read_body(Cursor::new("")).unwrap(), "");
    }

    #[test]
    fn invalid_utf8_input_is_an_input_error() {
        let err = read_body(Cursor::new(vec![0xff, 0xfe, b'\n'])).expect_err("invalid utf-8");
        assert!(err.to_string().starts_with("failed to read note text"));
    }
}
