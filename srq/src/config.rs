// src/config.rs
use anyhow::{Context as _, Result, anyhow};
use chrono::FixedOffset;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::cards::DEFAULT_CARD_SEPARATOR;
use crate::core::clock::offset_from_minutes;
use crate::ignore::IgnorePatterns;

pub const CONFIG_FILE_NAME: &str = ".srq.toml";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tags that put a note into a deck. Nested tags form their own decks.
    pub review_tags: Vec<String>,
    /// Scheduled notes due further ahead than this are left out of the queue.
    pub max_days_to_render: i64,
    /// Offset of the reviewer's day boundary from UTC.
    pub utc_offset_minutes: i32,
    pub card_separator: String,
    /// File extensions treated as notes, without the dot.
    pub extensions: Vec<String>,
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            review_tags: vec!["#review".to_owned()],
            max_days_to_render: 365,
            utc_offset_minutes: 0,
            card_separator: DEFAULT_CARD_SEPARATOR.to_owned(),
            extensions: vec!["md".to_owned()],
            ignore: Vec::new(),
        }
    }
}

impl Config {
    /// Parses a settings file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML for these settings.
    #[inline]
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.review_tags = config
            .review_tags
            .into_iter()
            .map(|tag| {
                if tag.starts_with('#') {
                    tag
                } else {
                    format!("#{tag}")
                }
            })
            .collect();
        Ok(config)
    }

    /// Loads the nearest `.srq.toml`, starting at `dir` and walking up the
    /// parent directories. Without one, the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    #[inline]
    pub fn load(dir: &Path) -> Result<Self> {
        match find_config_file(dir) {
            Some(path) => {
                let content = fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read config file: {}", path.display())
                })?;
                let config = Self::from_toml(&content)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?;
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configured offset is a day or more.
    #[inline]
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        offset_from_minutes(self.utc_offset_minutes)
            .ok_or_else(|| anyhow!("UTC offset out of range: {} minutes", self.utc_offset_minutes))
    }

    /// # Errors
    ///
    /// Returns an error if an ignore pattern has invalid glob syntax.
    #[inline]
    pub fn ignore_patterns(&self) -> Result<IgnorePatterns> {
        IgnorePatterns::new(&self.ignore)
    }

    /// True when `path` has one of the configured note extensions.
    #[must_use]
    pub fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let mut current_dir = dir.to_path_buf();
    let mut visited = HashSet::new();

    while visited.insert(current_dir.clone()) {
        let config_file = current_dir.join(CONFIG_FILE_NAME);
        if config_file.is_file() {
            return Some(config_file);
        }

        current_dir = current_dir.parent()?.to_path_buf();
    }

    None
}
