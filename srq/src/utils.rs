// src/utils.rs
use anyhow::{Context as _, Result};

use crate::core::patterns;
use crate::models::Frontmatter;

/// Parses the YAML header of a note. A note without one has default
/// frontmatter.
///
/// # Errors
///
/// Returns an error if the header is not valid YAML.
#[inline]
pub fn parse_frontmatter(content: &str) -> Result<Frontmatter> {
    let Some(header) = patterns::front_matter(content) else {
        return Ok(Frontmatter::default());
    };
    let yaml = &content[header.body];
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    serde_yaml_ng::from_str(yaml).context("Failed to parse frontmatter")
}

/// Every tag a note carries: frontmatter tags first, then tags written in
/// the body, without duplicates.
#[must_use]
pub fn note_tags(content: &str) -> Vec<String> {
    let mut tags = match parse_frontmatter(content) {
        Ok(frontmatter) => frontmatter.tags(),
        Err(e) => {
            log::debug!("ignoring frontmatter tags: {e:#}");
            Vec::new()
        }
    };

    let body_start = patterns::front_matter(content).map_or(0, |header| header.end);
    for tag in patterns::inline_tags(&content[body_start..]) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}

#[inline]
#[must_use]
pub fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| {
        // Don't consider temp directories as hidden
        if s.starts_with(".tmp") {
            return false;
        }
        s.starts_with('.') && s != "." && s != ".."
    })
}
