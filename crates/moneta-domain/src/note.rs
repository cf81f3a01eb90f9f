//! Bounded free-text annotations carried by transactions and rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Free text attached to a transaction or recurring rule, bounded to
/// [`Note::MAX_LEN`] bytes of UTF-8.
///
/// Construction validates the bound instead of silently truncating; use
/// [`Note::truncated`] when clipping is the intended behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note(String);

impl Note {
    /// Upper bound on note text, in bytes.
    pub const MAX_LEN: usize = 128;

    pub fn new(text: impl Into<String>) -> Result<Self, NoteError> {
        let text = text.into();
        if text.len() > Self::MAX_LEN {
            return Err(NoteError::TooLong {
                len: text.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(text))
    }

    /// Builds a note from arbitrary text, clipping at the nearest character
    /// boundary at or below the bound.
    pub fn truncated(text: &str) -> Self {
        if text.len() <= Self::MAX_LEN {
            return Self(text.to_string());
        }
        let mut end = Self::MAX_LEN;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self(text[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Note {
    type Error = NoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Note::new(value)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    TooLong { len: usize, max: usize },
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::TooLong { len, max } => {
                write!(f, "note is {len} bytes, the limit is {max}")
            }
        }
    }
}

impl std::error::Error for NoteError {}
