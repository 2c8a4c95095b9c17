//! Relevance scoring of resume content against extracted job keywords.
//!
//! Score components (all case-insensitive):
//! 1. +5 per item keyword that overlaps any job keyword (either contains the other)
//! 2. +3 per job keyword found inside the item's text
//! 3. +1 per text word longer than 3 chars that appears in the raw job description

use serde::Serialize;

use crate::models::resume::{Bullet, Education, Job, Project, Summary};
use crate::optimization::keywords::KeywordSet;

const KEYWORD_OVERLAP_POINTS: u32 = 5;
const TEXT_CONTAINS_POINTS: u32 = 3;
const WORD_OVERLAP_POINTS: u32 = 1;
const MIN_BONUS_WORD_CHARS: usize = 4;

/// Anything the scorer can rank: optional free text plus attached keywords.
pub trait Scoreable {
    fn text(&self) -> Option<&str>;
    fn keywords(&self) -> &[String];
}

impl Scoreable for Summary {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Scoreable for Bullet {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

// Entries carry no text of their own; their detail lives in bullets.

impl Scoreable for Job {
    fn text(&self) -> Option<&str> {
        None
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Scoreable for Project {
    fn text(&self) -> Option<&str> {
        None
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Scoreable for Education {
    fn text(&self) -> Option<&str> {
        None
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// An item paired with its score. Only lives for the duration of one optimization.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem<T> {
    pub item: T,
    pub score: u32,
    pub keyword_matches: Vec<String>,
}

/// Job keywords and description, lowercased once per optimization.
#[derive(Debug, Clone)]
pub struct JobContext {
    keywords_lower: Vec<String>,
    description_lower: String,
}

impl JobContext {
    pub fn new(job_keywords: &KeywordSet, job_description: &str) -> Self {
        Self {
            keywords_lower: job_keywords.iter().map(str::to_lowercase).collect(),
            description_lower: job_description.to_lowercase(),
        }
    }

    /// True if `keyword` and any job keyword contain one another, ignoring case.
    ///
    /// Rewards partial matches such as "React" vs "React.js" or "Java" vs "JavaScript".
    /// Abbreviations are not expanded: "JS" does not overlap "JavaScript".
    pub fn overlaps_any(&self, keyword: &str) -> bool {
        let keyword_lower = keyword.to_lowercase();
        self.keywords_lower
            .iter()
            .any(|jk| jk.contains(&keyword_lower) || keyword_lower.contains(jk.as_str()))
    }

    /// Returns the item keywords that overlap at least one job keyword, in item order.
    pub fn keyword_matches(&self, keywords: &[String]) -> Vec<String> {
        keywords
            .iter()
            .filter(|k| self.overlaps_any(k))
            .cloned()
            .collect()
    }

    pub fn score_item<S: Scoreable + ?Sized>(&self, item: &S) -> u32 {
        let keyword_score = item
            .keywords()
            .iter()
            .filter(|k| self.overlaps_any(k))
            .count() as u32
            * KEYWORD_OVERLAP_POINTS;

        let text_lower = item.text().unwrap_or_default().to_lowercase();

        let text_score = self
            .keywords_lower
            .iter()
            .filter(|jk| text_lower.contains(jk.as_str()))
            .count() as u32
            * TEXT_CONTAINS_POINTS;

        // Every occurrence counts, including repeated words.
        let word_score = text_lower
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_BONUS_WORD_CHARS)
            .filter(|word| self.description_lower.contains(*word))
            .count() as u32
            * WORD_OVERLAP_POINTS;

        keyword_score + text_score + word_score
    }

    /// Scores every bullet and returns them sorted by descending score.
    ///
    /// The sort is stable: equal scores keep their original relative order.
    pub fn score_bullets(&self, bullets: &[Bullet]) -> Vec<ScoredItem<Bullet>> {
        let mut scored: Vec<ScoredItem<Bullet>> = bullets
            .iter()
            .map(|bullet| ScoredItem {
                item: bullet.clone(),
                score: self.score_item(bullet),
                keyword_matches: self.keyword_matches(&bullet.keywords),
            })
            .collect();

        sort_by_score_desc(&mut scored);
        scored
    }
}

/// Stable descending sort on score.
pub fn sort_by_score_desc<T>(items: &mut [ScoredItem<T>]) {
    items.sort_by(|a, b| b.score.cmp(&a.score));
}
