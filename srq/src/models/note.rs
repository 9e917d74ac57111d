// src/models/note.rs
use std::path::{Path, PathBuf};

use crate::core::extract::{Extraction, extract};
use crate::models::ScheduleEntry;
use crate::utils::note_tags;

/// A scanned note: its identifier, the tags it carries and the schedule
/// found in its text.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    pub tags: Vec<String>,
    pub extraction: Extraction,
}

impl Note {
    /// Reads tags and schedule entries out of the note text.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        let extraction = extract(text);
        if !extraction.shadowed.is_empty() {
            log::warn!(
                "{}: {} schedule wins over {:?}",
                path.display(),
                extraction
                    .encoding()
                    .map_or_else(|| "no".to_owned(), |e| e.to_string()),
                extraction.shadowed
            );
        }
        Self {
            tags: note_tags(text),
            extraction,
            path,
        }
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.extraction.entries
    }

    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.extraction.entries.is_empty()
    }

    /// Display name: the file name without extension.
    #[must_use]
    pub fn name(&self) -> String {
        display_name(&self.path)
    }
}

#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
