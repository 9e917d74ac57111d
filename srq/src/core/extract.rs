// src/core/extract.rs
use crate::core::patterns::{self, TripletMatch};
use crate::models::{Schedule, ScheduleEncoding, ScheduleEntry};

/// Order in which encodings are tried. The first one that matches owns the
/// note; later matches are only recorded.
pub const PRIORITY: [ScheduleEncoding; 3] = [
    ScheduleEncoding::HeaderBlock,
    ScheduleEncoding::MultiCardInline,
    ScheduleEncoding::Legacy,
];

/// Outcome of looking for one encoding in a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Matched(Vec<ScheduleEntry>),
    /// Marker text was found but its fields do not parse.
    Malformed,
    Absent,
}

/// Schedule entries read from one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Entries of the winning encoding, in text order. Empty for a new note.
    pub entries: Vec<ScheduleEntry>,
    /// Lower-priority encodings that matched as well and were ignored.
    pub shadowed: Vec<ScheduleEncoding>,
    /// Encodings whose marker text failed to parse.
    pub malformed: Vec<ScheduleEncoding>,
}

impl Extraction {
    #[must_use]
    pub fn encoding(&self) -> Option<ScheduleEncoding> {
        self.entries.first().map(|entry| entry.encoding)
    }

    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Looks for a single encoding in `text`.
#[must_use]
pub fn attempt(encoding: ScheduleEncoding, text: &str) -> Attempt {
    match encoding {
        ScheduleEncoding::HeaderBlock => match patterns::header_schedule(text) {
            Some(found) => single(encoding, &found),
            None if patterns::has_header_due_field(text) => Attempt::Malformed,
            None => Attempt::Absent,
        },
        ScheduleEncoding::MultiCardInline => {
            let markers = patterns::multi_markers(text);
            if markers.is_empty() {
                return Attempt::Absent;
            }
            // one bad marker fails them all, otherwise later cards would shift
            markers
                .iter()
                .map(|found| entry_from(encoding, found))
                .collect::<Option<Vec<_>>>()
                .map_or(Attempt::Malformed, Attempt::Matched)
        }
        ScheduleEncoding::Legacy => patterns::legacy_markers(text)
            .first()
            .map_or(Attempt::Absent, |found| single(encoding, found)),
    }
}

fn single(encoding: ScheduleEncoding, found: &TripletMatch<'_>) -> Attempt {
    entry_from(encoding, found).map_or(Attempt::Malformed, |entry| Attempt::Matched(vec![entry]))
}

fn entry_from(encoding: ScheduleEncoding, found: &TripletMatch<'_>) -> Option<ScheduleEntry> {
    let schedule = Schedule::parse(found.due, found.interval, found.ease)?;
    Some(ScheduleEntry::extracted(
        encoding,
        found.range.clone(),
        found.matched,
        schedule,
    ))
}

/// Reads the schedule entries of a note.
///
/// Never fails: a note whose markers are all missing or malformed is new.
#[must_use]
pub fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for encoding in PRIORITY {
        match attempt(encoding, text) {
            Attempt::Matched(entries) if extraction.entries.is_empty() => {
                extraction.entries = entries;
            }
            Attempt::Matched(_) => extraction.shadowed.push(encoding),
            Attempt::Malformed => {
                log::debug!("ignoring malformed {encoding} schedule");
                extraction.malformed.push(encoding);
            }
            Attempt::Absent => {}
        }
    }

    extraction
}
