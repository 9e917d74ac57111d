// src/core/deck.rs
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::{Note, ScheduleEntry};

/// One due card of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNote {
    pub path: PathBuf,
    pub due: NaiveDate,
}

/// Notes of one review deck, split into never-reviewed and scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDeck {
    pub deck_name: String,
    new_notes: Vec<PathBuf>,
    scheduled_notes: Vec<ScheduledNote>,
}

impl ReviewDeck {
    #[must_use]
    pub fn new(deck_name: impl Into<String>) -> Self {
        Self {
            deck_name: deck_name.into(),
            new_notes: Vec::new(),
            scheduled_notes: Vec::new(),
        }
    }

    /// Notes without a schedule, in the order they were classified.
    #[inline]
    #[must_use]
    pub fn new_notes(&self) -> &[PathBuf] {
        &self.new_notes
    }

    /// One pair per scheduled card, ascending by due date.
    #[inline]
    #[must_use]
    pub fn scheduled_notes(&self) -> &[ScheduledNote] {
        &self.scheduled_notes
    }

    #[must_use]
    pub fn note_count(&self) -> usize {
        self.new_notes.len() + self.scheduled_notes.len()
    }

    /// Files a note as new, or inserts one `(path, due)` pair per entry.
    ///
    /// Pairs with equal due dates keep the order they were inserted in.
    pub fn classify(&mut self, path: &Path, entries: &[ScheduleEntry]) {
        if entries.is_empty() {
            self.new_notes.push(path.to_path_buf());
            return;
        }

        for entry in entries {
            let due = entry.schedule.due;
            let at = self.scheduled_notes.partition_point(|note| note.due <= due);
            self.scheduled_notes.insert(
                at,
                ScheduledNote {
                    path: path.to_path_buf(),
                    due,
                },
            );
        }
    }

    pub fn clear(&mut self) {
        self.new_notes.clear();
        self.scheduled_notes.clear();
    }

    /// Forgets every note and classifies `notes` from scratch.
    pub fn rebuild<'a>(&mut self, notes: impl IntoIterator<Item = &'a Note>) {
        self.clear();
        for note in notes {
            self.classify(&note.path, note.entries());
        }
    }
}

/// True when `tag` is `review_tag` or nested below it (`#review/math`).
/// Tags compare case-insensitively.
#[must_use]
pub fn is_review_tag(tag: &str, review_tag: &str) -> bool {
    let tag = tag.to_lowercase();
    let review_tag = review_tag.to_lowercase();
    tag == review_tag
        || tag
            .strip_prefix(review_tag.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Decks a note with `tags` belongs to. Each matching tag names a deck.
#[must_use]
pub fn deck_names<'a>(tags: &'a [String], review_tags: &[String]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for tag in tags {
        let matches = review_tags
            .iter()
            .any(|review_tag| is_review_tag(tag, review_tag));
        if matches && !names.contains(&tag.as_str()) {
            names.push(tag);
        }
    }
    names
}

/// All review decks of a vault, keyed by deck name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decks {
    decks: BTreeMap<String, ReviewDeck>,
}

impl Decks {
    /// Builds every deck from a full scan of the vault.
    ///
    /// A note tagged for two decks is classified into each separately.
    #[must_use]
    pub fn rescan<'a>(notes: impl IntoIterator<Item = &'a Note>, review_tags: &[String]) -> Self {
        let mut decks = Self::default();
        for note in notes {
            for name in deck_names(&note.tags, review_tags) {
                decks
                    .decks
                    .entry(name.to_owned())
                    .or_insert_with(|| ReviewDeck::new(name))
                    .classify(&note.path, note.entries());
            }
        }
        decks
    }

    #[must_use]
    pub fn get(&self, deck_name: &str) -> Option<&ReviewDeck> {
        self.decks.get(deck_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReviewDeck> {
        self.decks.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}
