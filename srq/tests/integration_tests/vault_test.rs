// tests/integration_tests/vault_test.rs
use super::common::{create_config_file, create_test_file, date, setup_test_vault};
use anyhow::Result;
use srq::models::Schedule;
use srq::vault::{FsNoteStore, apply_review, note_paths, rescan, scan_notes};
use srq::{Config, extract};
use std::fs;

#[test]
fn test_scan_skips_hidden_and_foreign_files() -> Result<()> {
    let vault = setup_test_vault()?;
    let paths = note_paths(vault.path(), &Config::default())?;
    let names: Vec<String> = paths
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_owned))
        .collect();
    assert_eq!(
        names,
        vec!["cards.md", "fresh.md", "header.md", "legacy.md", "untagged.md"]
    );
    Ok(())
}

#[test]
fn test_config_review_tags_and_ignore() -> Result<()> {
    let vault = setup_test_vault()?;
    create_test_file(vault.path(), "archive/old.md", "#review\nq::a <!--SR:!2020-01-01,1,250-->\n")?;
    create_config_file(
        vault.path(),
        "review_tags = [\"review/math\"]\nignore = [\"archive/\"]\n",
    )?;

    let config = Config::load(vault.path())?;
    let decks = rescan(vault.path(), &config, &FsNoteStore)?;
    assert_eq!(decks.len(), 1);
    let math = decks.get("#review/math").unwrap();
    assert_eq!(math.scheduled_notes().len(), 1);
    Ok(())
}

#[test]
fn test_unreadable_note_is_skipped() -> Result<()> {
    let vault = setup_test_vault()?;
    fs::write(vault.path().join("binary.md"), [0xff_u8, 0xfe, 0x00])?;

    let notes = scan_notes(vault.path(), &Config::default(), &FsNoteStore)?;
    assert_eq!(notes.len(), 5);
    assert!(notes.iter().all(|n| !n.path.ends_with("binary.md")));
    Ok(())
}

#[test]
fn test_rescan_after_review_moves_note() -> Result<()> {
    let vault = setup_test_vault()?;
    let fresh = vault.path().join("fresh.md");

    apply_review(&FsNoteStore, &fresh, 0, Schedule::new(date(2024, 1, 16), 1, 250))?;
    let text = fs::read_to_string(&fresh)?;
    assert_eq!(
        text,
        "---\ntags: review\nsr-due: 2024-01-16\nsr-interval: 1\nsr-ease: 250\n---\nNot reviewed yet.\n"
    );
    assert!(!extract(&text).is_new());

    let decks = rescan(vault.path(), &Config::default(), &FsNoteStore)?;
    let review = decks.get("#review").unwrap();
    assert!(review.new_notes().is_empty());
    assert_eq!(review.scheduled_notes().len(), 5);
    Ok(())
}
