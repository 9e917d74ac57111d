// src/models/schedule.rs
use chrono::{Datelike as _, NaiveDate};
use std::fmt;
use std::ops::Range;

/// Format used whenever a due date is written back into a note.
pub const PREFERRED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats accepted when reading a due date. The first one is canonical.
pub const ALLOWED_DATE_FORMATS: [&str; 3] = [PREFERRED_DATE_FORMAT, "%d-%m-%Y", "%a %b %d %Y"];

/// `num_days_from_ce` of 1970-01-01, day zero of the integer due form.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a due date to its day index (days since 1970-01-01).
#[must_use]
pub fn day_index(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - i64::from(UNIX_EPOCH_DAYS_FROM_CE)
}

/// Converts a day index back to a calendar date.
///
/// Returns `None` when the index falls outside the representable date range.
#[must_use]
pub fn from_day_index(index: i64) -> Option<NaiveDate> {
    let days = i32::try_from(index)
        .ok()?
        .checked_add(UNIX_EPOCH_DAYS_FROM_CE)?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Parses the date component of a schedule.
///
/// A bare (possibly negative) integer is a day index; anything else must
/// match one of [`ALLOWED_DATE_FORMATS`].
#[must_use]
pub fn parse_due(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(index) = raw.parse::<i64>() {
        return from_day_index(index);
    }
    ALLOWED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Review state of a single card: when it is due, the current interval in
/// days and the ease factor in hundredths (250 means 2.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schedule {
    pub due: NaiveDate,
    pub interval: u32,
    pub ease: u32,
}

impl Schedule {
    #[inline]
    #[must_use]
    pub const fn new(due: NaiveDate, interval: u32, ease: u32) -> Self {
        Self {
            due,
            interval,
            ease,
        }
    }

    /// Builds a schedule from the three raw text fields of a marker.
    ///
    /// Any field that does not parse (bad date, overflowing number) makes the
    /// whole triplet invalid.
    #[must_use]
    pub fn parse(due: &str, interval: &str, ease: &str) -> Option<Self> {
        Some(Self {
            due: parse_due(due)?,
            interval: interval.trim().parse().ok()?,
            ease: ease.trim().parse().ok()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn day_index(&self) -> i64 {
        day_index(self.due)
    }

    /// The due date in the canonical written form.
    #[must_use]
    pub fn due_string(&self) -> String {
        self.due.format(PREFERRED_DATE_FORMAT).to_string()
    }
}

/// The textual form a schedule was stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScheduleEncoding {
    /// `sr-due` / `sr-interval` / `sr-ease` fields in the frontmatter.
    HeaderBlock,
    /// One `!date,interval,ease` triplet per card.
    MultiCardInline,
    /// A single `<!--SR:date,interval,ease-->` comment.
    Legacy,
}

impl fmt::Display for ScheduleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HeaderBlock => "header block",
            Self::MultiCardInline => "multi-card inline",
            Self::Legacy => "legacy inline",
        };
        f.write_str(name)
    }
}

/// Where an extracted entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Byte range of the marker in the note text.
    pub range: Range<usize>,
    /// The exact text found at `range` when the note was scanned.
    pub text: String,
    /// Values as they were read.
    pub schedule: Schedule,
    pub encoding: ScheduleEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub schedule: Schedule,
    pub encoding: ScheduleEncoding,
    /// `None` for a header entry that has not been written yet.
    pub origin: Option<SourceSpan>,
}

impl ScheduleEntry {
    #[must_use]
    pub fn extracted(
        encoding: ScheduleEncoding,
        range: Range<usize>,
        text: &str,
        schedule: Schedule,
    ) -> Self {
        Self {
            schedule,
            encoding,
            origin: Some(SourceSpan {
                range,
                text: text.to_owned(),
                schedule,
                encoding,
            }),
        }
    }

    /// A header-block entry for a note that has no schedule yet.
    #[must_use]
    pub const fn fresh_header(schedule: Schedule) -> Self {
        Self {
            schedule,
            encoding: ScheduleEncoding::HeaderBlock,
            origin: None,
        }
    }

    #[must_use]
    pub fn span(&self) -> Option<Range<usize>> {
        self.origin.as_ref().map(|origin| origin.range.clone())
    }

    /// True when the entry no longer matches what was read from the note.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.origin.as_ref().is_none_or(|origin| {
            origin.schedule != self.schedule || origin.encoding != self.encoding
        })
    }
}
