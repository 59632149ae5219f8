//! Ordered, read-only content tables.
//!
//! Entries keep their insertion order; that order is the tie-break for scored
//! selection, so tables are a `Vec` of `(id, item)` pairs rather than a map.

use crate::error::AppError;
use serde::Serialize;
use std::collections::HashSet;

/// An item that can be matched against user tags.
pub trait Tagged {
    fn trigger_tags(&self) -> &[&'static str];
}

/// How a table entry was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// Highest tag-overlap score
    Scored,
    /// Synonym map hit
    Direct,
    /// Nothing overlapped; the table's designated fallback entry
    Fallback,
    /// No mapping matched, or a lookup failed; the fixed default entry
    Default,
}

/// A borrowed table entry plus how it was picked.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'t, T> {
    pub id: &'t str,
    pub item: &'t T,
    pub match_score: u32,
    pub kind: SelectionKind,
}

#[derive(Debug, Clone)]
pub struct ContentTable<T> {
    name: &'static str,
    entries: Vec<(String, T)>,
    fallback_id: String,
    default_tags: Vec<String>,
}

impl<T> ContentTable<T> {
    pub fn new(name: &'static str, entries: Vec<(&str, T)>, fallback_id: &str) -> Self {
        Self {
            name,
            entries: entries
                .into_iter()
                .map(|(id, item)| (id.to_string(), item))
                .collect(),
            fallback_id: fallback_id.to_string(),
            default_tags: Vec::new(),
        }
    }

    /// Tags used by the scorer when a request carries none.
    pub fn with_default_tags(mut self, tags: &[&str]) -> Self {
        self.default_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entry(id).map(|(_, item)| item)
    }

    /// Entry lookup returning the id with the table's lifetime.
    pub fn entry(&self, id: &str) -> Option<(&str, &T)> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(key, item)| (key.as_str(), item))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(id, item)| (id.as_str(), item))
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn default_tags(&self) -> &[String] {
        &self.default_tags
    }

    /// The fallback entry, or a configuration error if it is missing.
    pub fn fallback(&self) -> Result<(&str, &T), AppError> {
        self.entry(&self.fallback_id).ok_or_else(|| {
            AppError::Config(format!(
                "{} table has no fallback entry '{}'",
                self.name, self.fallback_id
            ))
        })
    }

    /// Startup check: non-empty, unique ids, fallback present.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.entries.is_empty() {
            return Err(AppError::Config(format!("{} table is empty", self.name)));
        }

        let mut seen = HashSet::new();
        for (id, _) in &self.entries {
            if !seen.insert(id.as_str()) {
                return Err(AppError::Config(format!(
                    "{} table has duplicate id '{}'",
                    self.name, id
                )));
            }
        }

        self.fallback().map(|_| ())
    }
}
