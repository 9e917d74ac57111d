// tests/integration_tests/common.rs
use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::TempDir;

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn create_config_file(dir: &Path, content: &str) -> Result<()> {
    create_test_file(dir, ".srq.toml", content)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small vault reviewed on 2024-01-15.
pub fn setup_test_vault() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    create_test_file(
        temp_dir.path(),
        "header.md",
        "---\ntags: [review]\nsr-due: 2024-01-15\nsr-interval: 3\nsr-ease: 250\n---\n# Header\n",
    )?;

    create_test_file(
        temp_dir.path(),
        "cards.md",
        "#review\nfirst::1 <!--SR:!2024-01-14,1,230-->\nsecond::2 <!--SR:!2024-01-16,4,250-->\nthird::3 <!--SR:!2024-03-01,40,270-->\n",
    )?;

    create_test_file(
        temp_dir.path(),
        "legacy.md",
        "#review/math\nq::a <!--SR:2024-01-15,3,250-->\n",
    )?;

    create_test_file(temp_dir.path(), "fresh.md", "---\ntags: review\n---\nNot reviewed yet.\n")?;

    create_test_file(temp_dir.path(), "untagged.md", "q::a <!--SR:!2024-01-15,3,250-->\n")?;

    create_test_file(temp_dir.path(), ".obsidian/workspace.md", "#review\n")?;

    create_test_file(temp_dir.path(), "attachments/image.png", "")?;

    Ok(temp_dir)
}
