// src/core/serialize.rs
use std::borrow::Cow;

use thiserror::Error;

use crate::core::extract::Extraction;
use crate::core::patterns;
use crate::models::{Schedule, ScheduleEncoding, ScheduleEntry, SourceSpan};

pub const SR_COMMENT_BEGIN: &str = "<!--SR:";
pub const SR_COMMENT_END: &str = "-->";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("schedule at bytes {start}..{end} no longer matches the note text")]
    SpanConflict { start: usize, end: usize },

    #[error("schedule spans overlap at byte {0}")]
    OverlappingSpans(usize),

    #[error("cannot rewrite a {from} schedule as {to}")]
    UnsupportedMigration {
        from: ScheduleEncoding,
        to: ScheduleEncoding,
    },

    #[error("new {0} schedule has no position in the note")]
    Unanchored(ScheduleEncoding),

    #[error("note already has header schedule fields")]
    AlreadyScheduled,

    #[error("a header schedule must be the only entry of its note, got {0} entries")]
    HeaderNotAlone(usize),

    #[error("card {index} is out of range for a note with {count} schedules")]
    CardOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, SerializeError>;

/// The three header lines, joined with `newline` and without a trailing one.
#[must_use]
pub fn header_fields(schedule: &Schedule, newline: &str) -> String {
    format!(
        "sr-due: {}{newline}sr-interval: {}{newline}sr-ease: {}",
        schedule.due_string(),
        schedule.interval,
        schedule.ease
    )
}

#[must_use]
pub fn multi_marker(schedule: &Schedule) -> String {
    format!(
        "!{},{},{}",
        schedule.due_string(),
        schedule.interval,
        schedule.ease
    )
}

#[must_use]
pub fn legacy_marker(schedule: &Schedule) -> String {
    format!(
        "{SR_COMMENT_BEGIN}{},{},{}{SR_COMMENT_END}",
        schedule.due_string(),
        schedule.interval,
        schedule.ease
    )
}

fn render<'a>(origin: &'a SourceSpan, entry: &ScheduleEntry) -> Result<Cow<'a, str>> {
    if !entry.is_modified() {
        return Ok(Cow::Borrowed(&origin.text));
    }

    let schedule = &entry.schedule;
    let rendered = match (origin.encoding, entry.encoding) {
        (ScheduleEncoding::HeaderBlock, ScheduleEncoding::HeaderBlock) => {
            header_fields(schedule, patterns::line_ending(&origin.text))
        }
        (ScheduleEncoding::MultiCardInline, ScheduleEncoding::MultiCardInline) => {
            multi_marker(schedule)
        }
        (ScheduleEncoding::Legacy, ScheduleEncoding::Legacy) => legacy_marker(schedule),
        (ScheduleEncoding::Legacy, ScheduleEncoding::MultiCardInline) => {
            format!(
                "{SR_COMMENT_BEGIN}{}{SR_COMMENT_END}",
                multi_marker(schedule)
            )
        }
        (from, to) => return Err(SerializeError::UnsupportedMigration { from, to }),
    };
    Ok(Cow::Owned(rendered))
}

/// Adds header schedule fields to a note that has none.
///
/// The fields go at the end of the existing header, or into a new header
/// prepended to the note. The note's line-ending style is kept.
///
/// # Errors
///
/// Returns [`SerializeError::AlreadyScheduled`] if the header already has an
/// `sr-due` field.
pub fn insert_header_schedule(text: &str, schedule: &Schedule) -> Result<String> {
    if patterns::has_header_due_field(text) {
        return Err(SerializeError::AlreadyScheduled);
    }

    let newline = patterns::line_ending(text);
    let fields = header_fields(schedule, newline);

    Ok(match patterns::front_matter(text) {
        Some(header) => {
            let (before, after) = text.split_at(header.closing_line());
            format!("{before}{fields}{newline}{after}")
        }
        None => format!("---{newline}{fields}{newline}---{newline}{newline}{text}"),
    })
}

/// Writes `entries` back into the text they were extracted from.
///
/// Only the byte ranges recorded on the entries are touched, and unmodified
/// entries are copied verbatim, so serializing an untouched extraction gives
/// back the original text. The rewrite is all-or-nothing.
///
/// # Errors
///
/// Fails without producing any text when:
/// * an entry's range no longer holds the text it was read from
/// * two entries overlap
/// * an entry asks for an encoding change other than legacy to multi-card
/// * a header entry is mixed with other entries
/// * an entry without a position is not a header entry
pub fn serialize(text: &str, entries: &[ScheduleEntry]) -> Result<String> {
    let has_header = entries
        .iter()
        .any(|entry| entry.encoding == ScheduleEncoding::HeaderBlock);
    if has_header && entries.len() > 1 {
        return Err(SerializeError::HeaderNotAlone(entries.len()));
    }

    let mut fresh_header = None;
    let mut anchored: Vec<(&SourceSpan, &ScheduleEntry)> = Vec::with_capacity(entries.len());
    for entry in entries {
        match &entry.origin {
            Some(origin) => {
                if text.get(origin.range.clone()) != Some(origin.text.as_str()) {
                    return Err(SerializeError::SpanConflict {
                        start: origin.range.start,
                        end: origin.range.end,
                    });
                }
                anchored.push((origin, entry));
            }
            None if entry.encoding == ScheduleEncoding::HeaderBlock => {
                fresh_header = Some(entry.schedule);
            }
            None => return Err(SerializeError::Unanchored(entry.encoding)),
        }
    }
    anchored.sort_by_key(|(origin, _)| origin.range.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (origin, entry) in anchored {
        if origin.range.start < cursor {
            return Err(SerializeError::OverlappingSpans(origin.range.start));
        }
        out.push_str(&text[cursor..origin.range.start]);
        out.push_str(&render(origin, entry)?);
        cursor = origin.range.end;
    }
    out.push_str(&text[cursor..]);

    match fresh_header {
        Some(schedule) => insert_header_schedule(&out, &schedule),
        None => Ok(out),
    }
}

/// Applies a review result to card `card` of a note.
///
/// A new note gets a header schedule when `card` is `0`.
///
/// # Errors
///
/// Returns [`SerializeError::CardOutOfRange`] when the note has no schedule
/// for `card`, and any error of [`serialize`].
pub fn reschedule(
    text: &str,
    extraction: &Extraction,
    card: usize,
    schedule: Schedule,
) -> Result<String> {
    if extraction.is_new() {
        if card != 0 {
            return Err(SerializeError::CardOutOfRange {
                index: card,
                count: 0,
            });
        }
        return serialize(text, &[ScheduleEntry::fresh_header(schedule)]);
    }

    let mut entries = extraction.entries.clone();
    let count = entries.len();
    let entry = entries
        .get_mut(card)
        .ok_or(SerializeError::CardOutOfRange { index: card, count })?;
    entry.schedule = schedule;
    serialize(text, &entries)
}
