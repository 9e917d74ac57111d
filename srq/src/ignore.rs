// src/ignore.rs
use anyhow::{Context as _, Result};
use glob::Pattern;
use std::path::Path;

/// Glob patterns for vault paths that are never scanned.
#[derive(Debug, Default)]
pub struct IgnorePatterns {
    /// (pattern, is_negation)
    patterns: Vec<(Pattern, bool)>,
}

impl IgnorePatterns {
    /// Compiles every pattern in `patterns`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern with invalid glob syntax.
    #[inline]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut ignore = Self::default();
        for pattern in patterns {
            ignore.add_pattern(pattern.as_ref())?;
        }
        Ok(ignore)
    }

    /// Adds one pattern.
    ///
    /// - `!` negates a pattern, re-including paths an earlier pattern ignored
    /// - a trailing `/` ignores a whole directory
    /// - a leading `/` anchors the pattern to the vault root
    /// - anything else without a `/` matches at any depth
    ///
    /// Empty lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern has invalid glob syntax.
    #[inline]
    pub fn add_pattern(&mut self, pattern: &str) -> Result<()> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern.starts_with('#') {
            return Ok(());
        }

        let (pattern, is_negation) = pattern
            .strip_prefix('!')
            .map_or((pattern, false), |stripped| (stripped, true));

        let glob_pattern = if let Some(anchored) = pattern.strip_prefix('/') {
            match anchored.strip_suffix('/') {
                Some(dir) => format!("{dir}/**"),
                None => anchored.to_owned(),
            }
        } else if let Some(dir) = pattern.strip_suffix('/') {
            format!("**/{dir}/**")
        } else if pattern.contains('/') {
            pattern.to_owned()
        } else {
            format!("**/{pattern}")
        };

        let compiled = Pattern::new(&glob_pattern)
            .with_context(|| format!("Invalid ignore pattern: {pattern}"))?;
        self.patterns.push((compiled, is_negation));
        Ok(())
    }

    /// True when `path`, relative to the vault root, is ignored.
    #[must_use]
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if self
            .patterns
            .iter()
            .any(|(pattern, is_neg)| *is_neg && pattern.matches_path(path))
        {
            return false;
        }

        self.patterns
            .iter()
            .any(|(pattern, is_neg)| !*is_neg && pattern.matches_path(path))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
