// src/vault.rs
use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::deck::Decks;
use crate::core::extract::extract;
use crate::core::serialize::reschedule;
use crate::models::{Note, Schedule};
use crate::utils::is_hidden;

/// Reads and writes whole note texts.
pub trait NoteStore {
    /// # Errors
    ///
    /// Returns an error if the note cannot be read as UTF-8 text.
    fn read(&self, path: &Path) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the note cannot be written.
    fn write(&self, path: &Path, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsNoteStore;

impl NoteStore for FsNoteStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read note: {}", path.display()))
    }

    fn write(&self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, text).with_context(|| format!("Failed to write note: {}", path.display()))
    }
}

/// Note files under `dir`, in file name order.
///
/// Hidden entries, ignored paths and files without a note extension are
/// skipped.
///
/// # Errors
///
/// Returns an error if an ignore pattern is invalid or `dir` cannot be walked.
#[inline]
pub fn note_paths(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let ignore = config.ignore_patterns()?;
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let relative = e.path().strip_prefix(dir).unwrap_or(e.path());
            !is_hidden(e) && !ignore.matches(relative)
        })
    {
        let entry = entry.with_context(|| format!("Failed to scan directory: {}", dir.display()))?;
        if entry.file_type().is_file() && config.is_note_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Reads and parses every note of the vault. Notes that cannot be read are
/// logged and left out.
///
/// # Errors
///
/// Returns an error if the vault directory cannot be walked.
#[inline]
pub fn scan_notes(dir: &Path, config: &Config, store: &dyn NoteStore) -> Result<Vec<Note>> {
    let paths = note_paths(dir, config)?;
    let mut notes = Vec::with_capacity(paths.len());
    let mut skipped = 0_usize;

    for path in paths {
        match store.read(&path) {
            Ok(text) => notes.push(Note::from_text(path, &text)),
            Err(e) => {
                log::warn!("skipping note: {e:#}");
                skipped += 1;
            }
        }
    }

    log::info!(
        "scanned {} notes in {} ({skipped} skipped)",
        notes.len(),
        dir.display()
    );
    Ok(notes)
}

/// Scans the vault and builds every review deck from scratch.
///
/// # Errors
///
/// Returns an error if the vault directory cannot be walked.
#[inline]
pub fn rescan(dir: &Path, config: &Config, store: &dyn NoteStore) -> Result<Decks> {
    let notes = scan_notes(dir, config, store)?;
    let decks = Decks::rescan(&notes, &config.review_tags);
    log::info!("built {} decks", decks.len());
    Ok(decks)
}

/// Writes a review result for card `card` back into the note at `path`.
/// Returns the new note text.
///
/// # Errors
///
/// Returns an error if the note cannot be read or written, or if the
/// schedule cannot be placed into the note text. Nothing is written then.
#[inline]
pub fn apply_review(
    store: &dyn NoteStore,
    path: &Path,
    card: usize,
    schedule: Schedule,
) -> Result<String> {
    let text = store.read(path)?;
    let extraction = extract(&text);
    let updated = reschedule(&text, &extraction, card, schedule)
        .with_context(|| format!("Failed to reschedule note: {}", path.display()))?;
    store.write(path, &updated)?;
    log::info!("rescheduled card {card} of {}", path.display());
    Ok(updated)
}
