//! Context matcher: regex selection over a newline-separated listing.

use crate::error::DispatchError;
use regex::Regex;
use std::collections::HashSet;

/// Compiled context pattern.
///
/// A line is selected when the leftmost match of the pattern within the trimmed
/// line is non-empty. The empty pattern is special-cased to select every
/// non-blank line, since its leftmost match is always the empty string.
#[derive(Debug, Clone)]
pub struct ContextMatcher {
    regex: Option<Regex>,
}

impl ContextMatcher {
    pub fn new(pattern: &str) -> Result<Self, DispatchError> {
        if pattern.is_empty() {
            return Ok(Self { regex: None });
        }
        let regex = Regex::new(pattern).map_err(|source| DispatchError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex: Some(regex) })
    }

    /// True when the pattern was empty and every name is selected.
    pub fn selects_all(&self) -> bool {
        self.regex.is_none()
    }

    /// Whether a single, already trimmed, name is selected.
    pub fn matches(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match &self.regex {
            None => true,
            Some(regex) => regex.find(name).is_some_and(|m| !m.as_str().is_empty()),
        }
    }

    /// Select names from a raw discovery listing.
    ///
    /// Lines are trimmed; blank lines and repeated names are dropped so every
    /// context is attempted at most once.
    pub fn filter(&self, listing: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        listing
            .lines()
            .map(str::trim)
            .filter(|name| self.matches(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}
