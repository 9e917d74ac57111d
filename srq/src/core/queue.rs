// src/core/queue.rs
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::core::clock::{Clock, days_until_due};
use crate::core::deck::{Decks, ReviewDeck};

/// Format of dated bucket labels, e.g. `Mon Jan 15 2024`.
pub const BUCKET_DATE_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketLabel {
    New,
    Yesterday,
    Today,
    Tomorrow,
    Date(NaiveDate),
}

impl BucketLabel {
    #[must_use]
    pub const fn for_offset(days_until_due: i64, due: NaiveDate) -> Self {
        match days_until_due {
            -1 => Self::Yesterday,
            0 => Self::Today,
            1 => Self::Tomorrow,
            _ => Self::Date(due),
        }
    }
}

impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("New"),
            Self::Yesterday => f.write_str("Yesterday"),
            Self::Today => f.write_str("Today"),
            Self::Tomorrow => f.write_str("Tomorrow"),
            Self::Date(date) => write!(f, "{}", date.format(BUCKET_DATE_FORMAT)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: BucketLabel,
    /// Shared due date of the notes; `None` for the new-notes bucket.
    pub due: Option<NaiveDate>,
    pub notes: Vec<PathBuf>,
}

impl Bucket {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckQueue {
    pub deck_name: String,
    /// New plus scheduled notes of the deck, ignoring the horizon.
    pub note_count: usize,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQueue {
    pub decks: Vec<DeckQueue>,
}

impl ReviewQueue {
    /// Notes per bucket label, summed over all decks.
    #[must_use]
    pub fn label_counts(&self) -> BTreeMap<BucketLabel, usize> {
        let mut counts = BTreeMap::new();
        for bucket in self.decks.iter().flat_map(|deck| &deck.buckets) {
            *counts.entry(bucket.label).or_insert(0) += bucket.len();
        }
        counts
    }
}

/// Groups a deck's notes into day buckets as seen at `now`.
///
/// New notes come first and are never cut by the horizon. Scheduled notes
/// follow in due order until one is more than `max_days_to_render` days
/// away. A bucket holds notes with exactly the same due date.
#[must_use]
pub fn bucket_deck(
    deck: &ReviewDeck,
    now: &DateTime<FixedOffset>,
    max_days_to_render: i64,
) -> DeckQueue {
    let mut buckets: Vec<Bucket> = Vec::new();

    if !deck.new_notes().is_empty() {
        buckets.push(Bucket {
            label: BucketLabel::New,
            due: None,
            notes: deck.new_notes().to_vec(),
        });
    }

    for scheduled in deck.scheduled_notes() {
        let days = days_until_due(scheduled.due, now);
        if days > max_days_to_render {
            break;
        }

        match buckets.last_mut() {
            Some(bucket) if bucket.due == Some(scheduled.due) => {
                bucket.notes.push(scheduled.path.clone());
            }
            _ => buckets.push(Bucket {
                label: BucketLabel::for_offset(days, scheduled.due),
                due: Some(scheduled.due),
                notes: vec![scheduled.path.clone()],
            }),
        }
    }

    DeckQueue {
        deck_name: deck.deck_name.clone(),
        note_count: deck.note_count(),
        buckets,
    }
}

/// Buckets every deck at the clock's current instant.
#[must_use]
pub fn build_queue(decks: &Decks, clock: &dyn Clock, max_days_to_render: i64) -> ReviewQueue {
    let now = clock.now();
    ReviewQueue {
        decks: decks
            .iter()
            .map(|deck| bucket_deck(deck, &now, max_days_to_render))
            .collect(),
    }
}
