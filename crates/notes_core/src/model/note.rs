//! Note record.
//!
//! # Responsibility
//! - Define the single persisted entry shape and its JSON field names.
//! - Provide the timestamp and preview projections used by list/show output.
//!
//! # Invariants
//! - JSON field order is `Timestamp`, `Title`, `Text`.
//! - `timestamp` keeps the offset it was created with; display uses that offset.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// Display format for timestamps in list/show output (`DD/MM/YYYY HH:MM`).
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Maximum characters of the first body line shown in list previews.
pub const PREVIEW_MAX_CHARS: usize = 40;

/// Marker appended to a preview cut at `PREVIEW_MAX_CHARS`.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Note {
    /// Creation time, serialized as RFC 3339 with sub-second precision.
    pub timestamp: DateTime<FixedOffset>,
    /// Free-form short title, may be empty.
    pub title: String,
    /// Free-form body; internal newlines are preserved.
    pub text: String,
}

impl Note {
    /// Creates a note stamped with the current local wall-clock time.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_timestamp(Local::now().fixed_offset(), title, text)
    }

    /// Creates a note with a caller-provided timestamp.
    pub fn with_timestamp(
        timestamp: DateTime<FixedOffset>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Returns the timestamp as `DD/MM/YYYY HH:MM` in the stored offset.
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
    }

    /// Returns the single-line body preview used by the list view.
    ///
    /// Only the text before the first newline is kept. A first line longer
    /// than `PREVIEW_MAX_CHARS` characters is cut to exactly that many and
    /// suffixed with `PREVIEW_ELLIPSIS`.
    pub fn preview(&self) -> String {
        let first_line = self.text.split('\n').next().unwrap_or_default();
        if first_line.chars().count() <= PREVIEW_MAX_CHARS {
            return first_line.to_string();
        }
        let mut preview: String = first_line.chars().take(PREVIEW_MAX_CHARS).collect();
        preview.push_str(PREVIEW_ELLIPSIS);
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, PREVIEW_MAX_CHARS};
    use chrono::DateTime;

    fn fixed_note(text: &str) -> Note {
        let timestamp = DateTime::parse_from_rfc3339("2024-03-09T07:05:42.5+02:00")
            .expect("fixture timestamp should parse");
        Note::with_timestamp(timestamp, "title", text)
    }

    #[test]
    fn display_timestamp_uses_day_month_year_in_stored_offset() {
        assert_eq!(fixed_note("").display_timestamp(), "09/03/2024 07:05");
    }

    #[test]
    fn preview_keeps_only_first_line() {
        assert_eq!(fixed_note("milk\neggs").preview(), "milk");
    }

    #[test]
    fn preview_at_limit_is_not_truncated() {
        let line = "x".repeat(PREVIEW_MAX_CHARS);
        assert_eq!(fixed_note(&line).preview(), line);
    }

    #[test]
    fn preview_over_limit_is_cut_to_limit_plus_ellipsis() {
        let line = "abcdefghij".repeat(5);
        let preview = fixed_note(&format!("{line}\nsecond")).preview();
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
        assert_eq!(preview, format!("{}...", &line[..PREVIEW_MAX_CHARS]));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let line = "é".repeat(PREVIEW_MAX_CHARS + 1);
        let preview = fixed_note(&line).preview();
        assert_eq!(preview, format!("{}...", "é".repeat(PREVIEW_MAX_CHARS)));
    }

    #[test]
    fn serializes_with_capitalized_fields_in_fixed_order() {
        let json = serde_json::to_string(&fixed_note("body")).expect("note should serialize");
        let timestamp_at = json.find("\"Timestamp\"").expect("Timestamp field");
        let title_at = json.find("\"Title\"").expect("Title field");
        let text_at = json.find("\"Text\"").expect("Text field");
        assert!(timestamp_at < title_at && title_at < text_at);
    }

    #[test]
    fn deserializes_utc_designator_timestamps() {
        let note: Note = serde_json::from_str(
            r#"{"Timestamp":"2023-12-31T23:59:00Z","Title":"t","Text":"a\nb"}"#,
        )
        .expect("note should deserialize");
        assert_eq!(note.display_timestamp(), "31/12/2023 23:59");
        assert_eq!(note.text, "a\nb");
    }
}
