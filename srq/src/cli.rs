// src/cli.rs
use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::cards::{CardAnchorSupplier, InlineCardAnchors, align};
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::core::extract::extract;
use crate::core::queue::{ReviewQueue, build_queue};
use crate::models::{Schedule, display_name};
use crate::models::schedule::parse_due;
use crate::vault::{FsNoteStore, NoteStore, apply_review, rescan};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Vault directory to scan (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Days ahead to show scheduled notes for (overrides config)
    #[arg(short = 'n', long)]
    pub days: Option<i64>,

    /// Minutes east of UTC where the review day starts (overrides config)
    #[arg(short = 'u', long, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// Build the queue as of midnight on this date instead of now
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the review queue of every deck (default)
    Queue,

    /// Print the schedules stored in one note
    Show {
        /// Note file, absolute or relative to the vault directory
        note: PathBuf,
    },

    /// Store a review result for one card of a note
    Review {
        /// Note file, absolute or relative to the vault directory
        note: PathBuf,

        /// Card position in the note, starting at 0
        #[arg(short, long, default_value = "0")]
        card: usize,

        /// Next due date (e.g. 2024-01-15)
        #[arg(long, value_parser = parse_due_arg)]
        due: NaiveDate,

        /// Interval in days
        #[arg(long)]
        interval: u32,

        /// Ease factor
        #[arg(long)]
        ease: u32,
    },
}

fn parse_due_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_due(raw).ok_or_else(|| format!("not a due date: {raw}"))
}

/// # Errors
///
/// Returns an error if the config is invalid, the vault cannot be scanned,
/// or a note cannot be read or rescheduled.
#[inline]
pub fn run(args: Args) -> Result<()> {
    let mut config = Config::load(&args.directory)?;
    if let Some(days) = args.days {
        config.max_days_to_render = days;
    }
    if let Some(minutes) = args.utc_offset {
        config.utc_offset_minutes = minutes;
    }

    match args.command.unwrap_or(Command::Queue) {
        Command::Queue => {
            let offset = config.utc_offset()?;
            let clock: Box<dyn Clock> = match args.today {
                Some(today) => Box::new(
                    FixedClock::at_midnight(today, offset)
                        .with_context(|| format!("Date out of range: {today}"))?,
                ),
                None => Box::new(SystemClock::new(offset)),
            };
            let decks = rescan(&args.directory, &config, &FsNoteStore)?;
            let queue = build_queue(&decks, clock.as_ref(), config.max_days_to_render);
            print!("{}", format_queue(&queue));
        }
        Command::Show { note } => {
            let path = resolve_note(&args.directory, &note);
            let text = FsNoteStore.read(&path)?;
            print!("{}", format_note(&path, &text, &config));
        }
        Command::Review {
            note,
            card,
            due,
            interval,
            ease,
        } => {
            let path = resolve_note(&args.directory, &note);
            apply_review(&FsNoteStore, &path, card, Schedule::new(due, interval, ease))
                .with_context(|| format!("Review not saved for {}", path.display()))?;
            println!(
                "{} card {card}: due {}, interval {interval}, ease {ease}",
                display_name(&path),
                due.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}

/// Relative note paths always resolve against the vault directory.
fn resolve_note(dir: &Path, note: &Path) -> PathBuf {
    if note.is_absolute() {
        note.to_path_buf()
    } else {
        dir.join(note)
    }
}

/// Renders the queue as an indented tree: decks, then buckets, then notes.
#[must_use]
pub fn format_queue(queue: &ReviewQueue) -> String {
    QueueView(queue).to_string()
}

/// Describes the schedules found in one note and the cards they belong to.
#[must_use]
pub fn format_note(path: &Path, text: &str, config: &Config) -> String {
    NoteView { path, text, config }.to_string()
}

struct QueueView<'a>(&'a ReviewQueue);

impl fmt::Display for QueueView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.0;
        if queue.decks.is_empty() {
            return writeln!(f, "No review decks found");
        }

        for deck in &queue.decks {
            writeln!(f, "{} ({})", deck.deck_name, deck.note_count)?;
            for bucket in &deck.buckets {
                writeln!(f, "  {} ({})", bucket.label, bucket.len())?;
                for note in &bucket.notes {
                    writeln!(f, "    {}", display_name(note))?;
                }
            }
        }

        let counts = queue.label_counts();
        if !counts.is_empty() {
            let summary: Vec<String> = counts
                .iter()
                .map(|(label, count)| format!("{label}: {count}"))
                .collect();
            writeln!(f, "\n{}", summary.join(", "))?;
        }
        Ok(())
    }
}

struct NoteView<'a> {
    path: &'a Path,
    text: &'a str,
    config: &'a Config,
}

impl fmt::Display for NoteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extraction = extract(self.text);
        writeln!(f, "{}", display_name(self.path))?;

        match extraction.encoding() {
            Some(encoding) => writeln!(f, "  encoding: {encoding}")?,
            None => writeln!(f, "  new note")?,
        }
        for (index, entry) in extraction.entries.iter().enumerate() {
            let schedule = &entry.schedule;
            writeln!(
                f,
                "  [{index}] due {}, interval {}, ease {}",
                schedule.due_string(),
                schedule.interval,
                schedule.ease
            )?;
        }
        for encoding in &extraction.shadowed {
            writeln!(f, "  ignored: {encoding} schedule")?;
        }
        for encoding in &extraction.malformed {
            writeln!(f, "  malformed: {encoding} schedule")?;
        }

        let anchors = InlineCardAnchors::new(self.config.card_separator.as_str()).anchors(self.text);
        for (index, card) in align(&anchors, &extraction).iter().enumerate() {
            let state = card
                .entry
                .map_or_else(|| "new".to_owned(), |entry| entry.schedule.due_string());
            writeln!(f, "  card {index} {}: {state}", card.anchor.identity)?;
        }
        Ok(())
    }
}
