// src/models/frontmatter.rs
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct Frontmatter {
    pub tags: Option<Tags>,
}

/// Obsidian accepts both `tags: [a, b]` and `tags: a, b`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<String>),
    Inline(String),
}

impl Frontmatter {
    /// Tags normalized to the `#tag` form used in note bodies.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let raw: Vec<&str> = match &self.tags {
            Some(Tags::List(tags)) => tags.iter().map(String::as_str).collect(),
            Some(Tags::Inline(tags)) => tags
                .split(|c: char| c == ',' || c.is_whitespace())
                .collect(),
            None => Vec::new(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| {
                if tag.starts_with('#') {
                    tag.to_owned()
                } else {
                    format!("#{tag}")
                }
            })
            .collect()
    }
}
