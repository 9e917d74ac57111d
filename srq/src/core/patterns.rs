// src/core/patterns.rs
//! Text recognizers for everything the scheduler reads out of a note.
//!
//! Every function here is pure: it borrows the note text and returns byte
//! ranges into it. Both `\n` and `\r\n` line endings are accepted wherever a
//! pattern spans lines.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `---` boundary lines around the YAML header at the very top of a note.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\r?\n(.*?)(?m:^)---[ \t]*(?:\r?\n|\z)").expect("valid front matter regex")
});

/// The three schedule fields, applied to the header body only.
static HEADER_SCHEDULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^sr-due: ([^\r\n]+)\r?\nsr-interval: ([0-9]+)\r?\nsr-ease: ([0-9]+)[ \t]*\r?$",
    )
    .expect("valid header schedule regex")
});

static HEADER_DUE_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^sr-due:").expect("valid header due regex"));

// Interval and ease capture any token up to the next separator, so a marker
// with a bad number is still found and reported as malformed.
static MULTI_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!([0-9-]+),(-?[^,!<>\s-]*),(-?[^,!<>\s-]*)").expect("valid multi marker regex")
});

static LEGACY_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--SR:([^!,<>\r\n][^,<>\r\n]*),(-?[^,!<>\s-]*),(-?[^,!<>\s-]*)-->")
        .expect("valid legacy marker regex")
});

static LEADING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[^\s#]+\s*").expect("valid leading tag regex"));

static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(#[\p{L}\p{N}_/-]+)").expect("valid inline tag regex"));

// Obsidian only recognizes a block id when the caret follows a space.
static BLOCK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (\^[a-zA-Z0-9-]+)$").expect("valid block id regex"));

static NON_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!-/:-@\[-`{-~\s]").expect("valid non-letter regex"));

/// Location of the header region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Lines between the two boundaries, including their line endings.
    pub body: Range<usize>,
    /// First byte after the closing boundary line.
    pub end: usize,
}

impl FrontMatter {
    /// Byte offset of the closing `---` line, where new fields are inserted.
    #[inline]
    #[must_use]
    pub const fn closing_line(&self) -> usize {
        self.body.end
    }
}

/// One `date,interval,ease` capture. Fields are still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripletMatch<'t> {
    pub range: Range<usize>,
    pub matched: &'t str,
    pub due: &'t str,
    pub interval: &'t str,
    pub ease: &'t str,
}

impl<'t> TripletMatch<'t> {
    fn from_captures(text: &'t str, caps: &regex::Captures<'t>, offset: usize) -> Option<Self> {
        let whole = caps.get(0)?;
        let ease = caps.get(3)?;
        let range = offset + whole.start()..offset + ease.end();
        Some(Self {
            matched: text.get(range.clone())?,
            range,
            due: caps.get(1)?.as_str(),
            interval: caps.get(2)?.as_str(),
            ease: ease.as_str(),
        })
    }
}

#[must_use]
pub fn front_matter(text: &str) -> Option<FrontMatter> {
    let caps = FRONT_MATTER_RE.captures(text)?;
    Some(FrontMatter {
        body: caps.get(1)?.range(),
        end: caps.get(0)?.end(),
    })
}

/// The header schedule fields, if the note has a header carrying them.
///
/// The returned range covers the three field lines without the final line
/// ending.
#[must_use]
pub fn header_schedule(text: &str) -> Option<TripletMatch<'_>> {
    let header = front_matter(text)?;
    let body = text.get(header.body.clone())?;
    let caps = HEADER_SCHEDULE_RE.captures(body)?;
    TripletMatch::from_captures(text, &caps, header.body.start)
}

/// True when the header mentions `sr-due` at all, well formed or not.
#[must_use]
pub fn has_header_due_field(text: &str) -> bool {
    front_matter(text)
        .and_then(|header| text.get(header.body))
        .is_some_and(|body| HEADER_DUE_FIELD_RE.is_match(body))
}

/// All current-format markers, in text order.
#[must_use]
pub fn multi_markers(text: &str) -> Vec<TripletMatch<'_>> {
    MULTI_MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| TripletMatch::from_captures(text, &caps, 0))
        .collect()
}

/// All legacy markers, in text order.
#[must_use]
pub fn legacy_markers(text: &str) -> Vec<TripletMatch<'_>> {
    LEGACY_MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            // the legacy range covers the whole comment, closing `-->` included
            let whole = caps.get(0)?;
            Some(TripletMatch {
                range: whole.range(),
                matched: whole.as_str(),
                due: caps.get(1)?.as_str(),
                interval: caps.get(2)?.as_str(),
                ease: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

/// Tags written in the note body, e.g. `#review` or `#review/math`.
pub fn inline_tags(text: &str) -> impl Iterator<Item = &str> {
    INLINE_TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Drops any tags at the start of a card line.
#[must_use]
pub fn strip_leading_tags(line: &str) -> &str {
    let mut rest = line.trim_start();
    while let Some(m) = LEADING_TAG_RE.find(rest) {
        rest = &rest[m.end()..];
    }
    rest
}

/// Drops a trailing ` ^block-id`.
#[must_use]
pub fn strip_block_id(line: &str) -> &str {
    let line = line.trim_end();
    BLOCK_ID_RE
        .find(line)
        .map_or(line, |m| &line[..m.start()])
}

/// Removes punctuation, symbols and whitespace, keeping letters and digits.
#[must_use]
pub fn strip_non_letters(text: &str) -> String {
    NON_LETTER_RE.replace_all(text, "").into_owned()
}

/// The line ending a piece of text uses.
#[must_use]
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}
