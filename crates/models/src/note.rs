use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::normalize::required;

pub const MAX_TITLE_CHARS: usize = 100;
pub const NOTE_EXTENSION: &str = "txt";

const UNSAFE_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a title usable as a file name: unsafe characters become `_` and the
/// result is cut to 100 characters. Applying it to its own output is a no-op.
pub fn sanitize_title(raw: &str) -> Result<String, ModelError> {
    let trimmed = required("title", raw)?;
    let cut: String = trimmed
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) || c.is_control() { '_' } else { c })
        .take(MAX_TITLE_CHARS)
        .collect();
    // the cut may land right after whitespace
    let sanitized = cut.trim_end().to_string();
    if sanitized.chars().all(|c| c == '_') {
        return Err(ModelError::invalid("title", "contains only invalid characters"));
    }
    Ok(sanitized)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub content: String,
}

/// Body of `PUT /notes/{title}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteContent {
    pub content: String,
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    if content.trim().is_empty() {
        return Err(ModelError::invalid("content", "cannot be empty"));
    }
    Ok(())
}

impl NoteInput {
    pub fn validate(self) -> Result<Note, ModelError> {
        let title = sanitize_title(&self.title)?;
        validate_content(&self.content)?;
        Ok(Note { title, content: self.content })
    }
}

impl Note {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.title, NOTE_EXTENSION)
    }
}

/// Note as returned to clients, with file metadata derived from the record.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NoteView {
    pub title: String,
    pub content: String,
    pub file_name: String,
    pub size_bytes: usize,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        let file_name = note.file_name();
        let size_bytes = note.content.len();
        Self { title: note.title, content: note.content, file_name, size_bytes }
    }
}
