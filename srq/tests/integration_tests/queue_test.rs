// tests/integration_tests/queue_test.rs
use super::common::{date, setup_test_vault};
use anyhow::Result;
use chrono::FixedOffset;
use srq::core::clock::FixedClock;
use srq::core::queue::BucketLabel;
use srq::vault::{FsNoteStore, rescan};
use srq::{Config, build_queue};

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

#[test]
fn test_vault_queue_buckets() -> Result<()> {
    let vault = setup_test_vault()?;
    let decks = rescan(vault.path(), &Config::default(), &FsNoteStore)?;
    let clock = FixedClock::at_midnight(date(2024, 1, 15), utc()).unwrap();
    let queue = build_queue(&decks, &clock, 365);

    let names: Vec<&str> = queue.decks.iter().map(|d| d.deck_name.as_str()).collect();
    assert_eq!(names, vec!["#review", "#review/math"]);

    let review = &queue.decks[0];
    let labels: Vec<BucketLabel> = review.buckets.iter().map(|b| b.label).collect();
    assert_eq!(
        labels,
        vec![
            BucketLabel::New,
            BucketLabel::Yesterday,
            BucketLabel::Today,
            BucketLabel::Tomorrow,
            BucketLabel::Date(date(2024, 3, 1)),
        ]
    );
    assert_eq!(review.note_count, 5);
    assert!(review.buckets[0].notes[0].ends_with("fresh.md"));
    assert!(review.buckets[2].notes[0].ends_with("header.md"));

    let math = &queue.decks[1];
    assert_eq!(math.buckets.len(), 1);
    assert_eq!(math.buckets[0].label, BucketLabel::Today);

    let counts = queue.label_counts();
    assert_eq!(counts.get(&BucketLabel::Today), Some(&2));
    Ok(())
}

#[test]
fn test_horizon_leaves_new_notes() -> Result<()> {
    let vault = setup_test_vault()?;
    let decks = rescan(vault.path(), &Config::default(), &FsNoteStore)?;
    let clock = FixedClock::at_midnight(date(2024, 1, 15), utc()).unwrap();

    let week = build_queue(&decks, &clock, 7);
    let review = &week.decks[0];
    assert_eq!(review.buckets.len(), 4);
    assert_eq!(review.buckets[0].label, BucketLabel::New);
    assert_eq!(review.note_count, 5);

    let overdue_only = build_queue(&decks, &clock, -1);
    let labels: Vec<BucketLabel> = overdue_only.decks[0].buckets.iter().map(|b| b.label).collect();
    assert_eq!(labels, vec![BucketLabel::New, BucketLabel::Yesterday]);
    Ok(())
}

#[test]
fn test_bucket_dates_strictly_increase() -> Result<()> {
    let vault = setup_test_vault()?;
    let decks = rescan(vault.path(), &Config::default(), &FsNoteStore)?;
    let clock = FixedClock::at_midnight(date(2024, 1, 10), utc()).unwrap();
    let queue = build_queue(&decks, &clock, 365);

    for deck in &queue.decks {
        let dues: Vec<_> = deck.buckets.iter().filter_map(|b| b.due).collect();
        assert!(dues.windows(2).all(|pair| pair[0] < pair[1]), "{dues:?}");
    }
    Ok(())
}

#[test]
fn test_offset_changes_the_review_day() -> Result<()> {
    let vault = setup_test_vault()?;
    let decks = rescan(vault.path(), &Config::default(), &FsNoteStore)?;
    // 2024-01-15 00:00 at UTC-05:00 is already 05:00 UTC
    let west = FixedOffset::west_opt(5 * 3600).unwrap();
    let clock = FixedClock::at_midnight(date(2024, 1, 15), west).unwrap();
    let queue = build_queue(&decks, &clock, 365);

    let review = &queue.decks[0];
    assert_eq!(review.buckets[2].label, BucketLabel::Today);
    assert_eq!(review.buckets[3].label, BucketLabel::Tomorrow);
    Ok(())
}
