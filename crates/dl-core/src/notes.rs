//! Helpers for rendering entry notes.

/// Words that mark a note as meeting time.
const MEETING_MARKERS: [&str; 2] = ["meet", "discussion"];

/// Drops a leading `-` bullet.
pub fn strip_bullet(note: &str) -> &str {
    note.strip_prefix('-').map_or(note, str::trim)
}

/// Renders a note as a bullet point unless it already is one.
pub fn bullet(note: &str) -> String {
    if note.starts_with('-') {
        note.to_string()
    } else {
        format!("- {note}")
    }
}

/// Joins notes into one line for worklog comments.
pub fn join_notes<S: AsRef<str>>(notes: &[S]) -> String {
    notes
        .iter()
        .map(|note| strip_bullet(note.as_ref()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// True when the text reads like a meeting or discussion.
pub fn is_meeting(text: &str) -> bool {
    let text = text.to_lowercase();
    MEETING_MARKERS.iter().any(|marker| text.contains(marker))
}
