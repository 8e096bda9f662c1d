//! Terminal output rendering for list/show/delete results.
//!
//! # Responsibility
//! - Produce the exact text written to standard output by each command.
//! - Keep formatting pure so it can be checked without a terminal.

use crate::model::note::Note;
use crate::model::number::NoteNumber;

/// Printed by list when the store holds no notes.
pub const EMPTY_STORE_MESSAGE: &str = "Not a single note has been created yet.";

/// Usage text for `--help` and argument errors.
pub const USAGE: &str = "
USAGE
    notes <option> [argument]

OPTIONS
    -a, --add [TITLE]
        Add a new note. The title can be specified as an argument.
        The text is read from standard input; press Ctrl+D to finish.

    -l, --list
        Display the list of all saved notes.

    -s, --show <NUMBER>
        Show the full text of the note with the given number.

    -d, --del <NUMBER>
        Delete the note with the given number.
        Later notes are renumbered.

    -h, --help
        Display this help.

ENVIRONMENT
    XDG_DATA_HOME   Base directory for go-notes/notes.json
                    (default: ~/.local/share).
    GO_NOTES_LOG    File log level: trace|debug|info|warn|error|off.
";

/// Renders one list entry: header line, indented preview, blank separator.
pub fn render_list_entry(position: usize, note: &Note) -> String {
    format!(
        "{:>2}. {}  [{}]\n    {}\n\n",
        position + 1,
        note.display_timestamp(),
        note.title,
        note.preview()
    )
}

/// Renders the whole list, or the empty-store message when there are no notes.
pub fn render_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!("{EMPTY_STORE_MESSAGE}\n");
    }
    notes
        .iter()
        .enumerate()
        .map(|(position, note)| render_list_entry(position, note))
        .collect()
}

/// Renders one note with its full body.
pub fn render_note(number: NoteNumber, note: &Note) -> String {
    format!(
        "{:>2}. {}  [{}]\n\n{}\n",
        number.get(),
        note.display_timestamp(),
        note.title,
        note.text
    )
}

/// Confirmation echoing the number exactly as the user typed it.
pub fn render_deleted(raw_number: &str) -> String {
    format!("Note {raw_number} was deleted successfully\n")
}
