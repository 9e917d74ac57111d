// src/core/cards.rs
use crate::core::extract::Extraction;
use crate::core::patterns;
use crate::models::{ScheduleEncoding, ScheduleEntry};

pub const DEFAULT_CARD_SEPARATOR: &str = "::";

/// Position of one reviewable card inside a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAnchor {
    /// Byte offset of the line the card starts on.
    pub offset: usize,
    /// Stable key derived from the card's question text.
    pub identity: String,
}

/// Finds the cards of a note, in text order.
pub trait CardAnchorSupplier {
    fn anchors(&self, text: &str) -> Vec<CardAnchor>;
}

/// Single-line `question::answer` cards, one per line holding the separator.
#[derive(Debug, Clone)]
pub struct InlineCardAnchors {
    separator: String,
}

impl InlineCardAnchors {
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for InlineCardAnchors {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_SEPARATOR)
    }
}

impl CardAnchorSupplier for InlineCardAnchors {
    fn anchors(&self, text: &str) -> Vec<CardAnchor> {
        if self.separator.is_empty() {
            return Vec::new();
        }

        let body_start = patterns::front_matter(text).map_or(0, |header| header.end);
        let mut offset = body_start;
        let mut anchors = Vec::new();

        for line in text[body_start..].split_inclusive('\n') {
            if let Some((question, _)) = line.split_once(self.separator.as_str()) {
                anchors.push(CardAnchor {
                    offset,
                    identity: card_identity(question),
                });
            }
            offset += line.len();
        }

        anchors
    }
}

/// Normalizes question text into an identity that survives cosmetic edits:
/// leading tags, a trailing block id, punctuation and spacing are ignored.
#[must_use]
pub fn card_identity(question: &str) -> String {
    let question = patterns::strip_leading_tags(question);
    let question = patterns::strip_block_id(question);
    patterns::strip_non_letters(question)
}

/// A card together with the schedule stored for it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSchedule<'a> {
    pub anchor: &'a CardAnchor,
    pub entry: Option<&'a ScheduleEntry>,
}

/// Pairs inline schedule entries with cards by position: the n-th marker
/// belongs to the n-th card. Cards past the last marker are new.
///
/// Header schedules belong to the note as a whole and are never paired.
#[must_use]
pub fn align<'a>(anchors: &'a [CardAnchor], extraction: &'a Extraction) -> Vec<CardSchedule<'a>> {
    let entries: &[ScheduleEntry] = match extraction.encoding() {
        Some(ScheduleEncoding::MultiCardInline | ScheduleEncoding::Legacy) => &extraction.entries,
        Some(ScheduleEncoding::HeaderBlock) | None => &[],
    };

    if entries.len() > anchors.len() {
        log::debug!(
            "{} schedule markers for {} cards, extra markers ignored",
            entries.len(),
            anchors.len()
        );
    }

    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| CardSchedule {
            anchor,
            entry: entries.get(index),
        })
        .collect()
}
