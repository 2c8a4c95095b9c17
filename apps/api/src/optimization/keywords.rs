//! Keyword Vocabulary: the known-keyword list and extraction of job keywords from free text.
//!
//! The vocabulary is read-only after load and shared via `Arc` in `AppState`.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Known keywords shipped with the binary.
const BUNDLED_KEYWORDS: &str = include_str!("../../data/known_keywords.json");

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read keyword vocabulary: {0}")]
    Io(#[from] std::io::Error),

    #[error("keyword vocabulary must be a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered list of recognised domain terms (technologies, skills, practices).
#[derive(Debug, Clone)]
pub struct KeywordVocabulary {
    keywords: Vec<String>,
}

impl KeywordVocabulary {
    /// Builds a vocabulary from raw entries, dropping blank ones.
    ///
    /// A blank keyword is a substring of every text and would match everything.
    pub fn new(entries: Vec<String>) -> Self {
        let keywords = entries
            .into_iter()
            .filter(|entry| {
                let blank = entry.trim().is_empty();
                if blank {
                    warn!("Skipping blank entry in keyword vocabulary");
                }
                !blank
            })
            .collect();
        Self { keywords }
    }

    pub fn bundled() -> Result<Self, VocabularyError> {
        Self::from_json(BUNDLED_KEYWORDS)
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let entries: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let json = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_json(&json)?;
        info!(
            "Loaded {} known keywords from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Extracts the known keywords mentioned in `text`.
    ///
    /// Pass 1: every keyword whose lowercase form is a substring of the lowercased text.
    /// Pass 2: every whitespace token equal (case-insensitively) to a keyword.
    /// Pass 2 only ever re-finds single-word keywords already caught by pass 1.
    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        let text_lower = text.to_lowercase();
        let mut found = KeywordSet::default();

        for keyword in &self.keywords {
            if text_lower.contains(&keyword.to_lowercase()) {
                found.insert(keyword);
            }
        }

        for token in text_lower.split_whitespace() {
            if let Some(keyword) = self.keywords.iter().find(|k| k.to_lowercase() == token) {
                found.insert(keyword);
            }
        }

        found
    }
}

/// Deduplicated set of job keywords. Iterates in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet {
    ordered: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl KeywordSet {
    /// Returns `false` if the keyword was already present.
    pub fn insert(&mut self, keyword: &str) -> bool {
        if !self.seen.insert(keyword.to_string()) {
            return false;
        }
        self.ordered.push(keyword.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl<'a> FromIterator<&'a str> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = KeywordSet::default();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}
