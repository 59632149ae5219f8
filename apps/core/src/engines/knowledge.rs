//! FAQ knowledge base with a JSON file cache.

use crate::content::faq::{curated_faqs, preprocess, FaqRecord};
use crate::error::AppError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

const WHOLE_QUERY_POINTS: u32 = 10;
const KEYWORD_POINTS: u32 = 5;
const QUESTION_WORD_POINTS: u32 = 2;
const ANSWER_WORD_POINTS: u32 = 1;
/// Query words of this length or shorter are ignored.
const SHORT_WORD_LEN: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct FaqHit {
    #[serde(flatten)]
    pub record: FaqRecord,
    pub relevance_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeStats {
    pub total_faqs: usize,
    pub categories: usize,
    pub category_breakdown: BTreeMap<String, usize>,
}

/// Where the records came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeOrigin {
    Cache,
    Regenerated,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    faqs: Vec<FaqRecord>,
    categories: BTreeSet<String>,
}

impl KnowledgeBase {
    pub fn from_records(faqs: Vec<FaqRecord>) -> Self {
        let categories = faqs.iter().map(|f| f.category.clone()).collect();
        Self { faqs, categories }
    }

    /// The curated records after cleaning.
    pub fn curated() -> Self {
        Self::from_records(preprocess(curated_faqs()))
    }

    /// Load the cache at `path`, or regenerate it from the curated records.
    ///
    /// A cache that cannot be written is logged and otherwise ignored.
    pub fn initialize(path: &Path) -> (Self, KnowledgeOrigin) {
        let cached = Self::load(path).and_then(|kb| {
            if kb.is_empty() {
                Err(AppError::Config(format!("{} holds no FAQs", path.display())))
            } else {
                Ok(kb)
            }
        });

        match cached {
            Ok(kb) => {
                info!("Loaded {} FAQs from {}", kb.len(), path.display());
                (kb, KnowledgeOrigin::Cache)
            }
            Err(e) => {
                warn!("FAQ cache unavailable ({}), regenerating", e);
                let kb = Self::curated();
                if let Err(e) = kb.save(path) {
                    warn!("Could not write FAQ cache {}: {}", path.display(), e);
                }
                info!("Knowledge base initialized with {} FAQs", kb.len());
                (kb, KnowledgeOrigin::Regenerated)
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let faqs: Vec<FaqRecord> = serde_json::from_str(&raw)?;
        Ok(Self::from_records(faqs))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.faqs)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.faqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faqs.is_empty()
    }

    #[cfg(test)]
    pub fn faqs(&self) -> &[FaqRecord] {
        &self.faqs
    }

    /// Ranked FAQs for a query, best first. Equal scores keep record order.
    pub fn search(&self, query: &str, category: Option<&str>, limit: usize) -> Vec<FaqHit> {
        let query_lower = query.to_lowercase();
        let words: Vec<&str> = query_lower
            .split_whitespace()
            .filter(|w| w.chars().count() > SHORT_WORD_LEN)
            .collect();

        let mut hits: Vec<FaqHit> = self
            .faqs
            .iter()
            .filter(|faq| category.map_or(true, |c| faq.category == c))
            .filter_map(|faq| {
                let question = faq.question.to_lowercase();
                let answer = faq.answer.to_lowercase();
                let mut score = 0;

                if question.contains(&query_lower) {
                    score += WHOLE_QUERY_POINTS;
                }
                for keyword in &faq.keywords {
                    if query_lower.contains(&keyword.to_lowercase()) {
                        score += KEYWORD_POINTS;
                    }
                }
                for word in &words {
                    if question.contains(word) {
                        score += QUESTION_WORD_POINTS;
                    }
                    if answer.contains(word) {
                        score += ANSWER_WORD_POINTS;
                    }
                }

                (score > 0).then(|| FaqHit {
                    record: faq.clone(),
                    relevance_score: score,
                })
            })
            .collect();

        // sort_by is stable.
        hits.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        hits.truncate(limit);
        hits
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.iter().cloned().collect()
    }

    pub fn stats(&self) -> KnowledgeStats {
        let mut breakdown = BTreeMap::new();
        for faq in &self.faqs {
            *breakdown.entry(faq.category.clone()).or_insert(0) += 1;
        }
        KnowledgeStats {
            total_faqs: self.faqs.len(),
            categories: self.categories.len(),
            category_breakdown: breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_search_ranks_question_matches_first() {
        let kb = KnowledgeBase::curated();
        let hits = kb.search("anxiety", None, DEFAULT_SEARCH_LIMIT);

        assert!(!hits.is_empty());
        assert_eq!(hits[0].record.question, "How do I know if I have anxiety?");
        // whole query in question (10) + word in question (2) + word in answer (1)
        assert_eq!(hits[0].relevance_score, 13);
    }

    #[test]
    fn test_search_respects_category_and_limit() {
        let kb = KnowledgeBase::curated();

        let hits = kb.search("sleep", Some("general_health"), 5);
        assert!(hits.iter().all(|h| h.record.category == "general_health"));
        assert_eq!(hits.len(), 1);

        let hits = kb.search("sleep", None, 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.question, "How much sleep do adults need?");
    }

    #[test]
    fn test_keywords_add_points() {
        let kb = KnowledgeBase::from_records(vec![FaqRecord {
            question: "Q".to_string(),
            answer: "A".to_string(),
            source: "Test".to_string(),
            category: "lifestyle".to_string(),
            keywords: vec!["Hydration".to_string()],
        }]);
        let hits = kb.search("tips on hydration", None, 5);
        assert_eq!(hits[0].relevance_score, 5);
    }

    #[test]
    fn test_short_words_are_ignored() {
        let kb = KnowledgeBase::curated();
        assert!(kb.search("zzz flu", None, 5).is_empty());
    }

    #[test]
    fn test_categories_and_stats() {
        let kb = KnowledgeBase::curated();
        let categories = kb.categories();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0], "acute_illness");

        let stats = kb.stats();
        assert_eq!(stats.total_faqs, 7);
        assert_eq!(stats.categories, 6);
        assert_eq!(stats.category_breakdown["lifestyle"], 2);
    }

    #[test]
    fn test_initialize_writes_then_reads_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faqs").join("medical_faqs.json");

        let (kb, origin) = KnowledgeBase::initialize(&path);
        assert_eq!(origin, KnowledgeOrigin::Regenerated);
        assert_eq!(kb.len(), 7);
        assert!(path.exists());

        let (cached, origin) = KnowledgeBase::initialize(&path);
        assert_eq!(origin, KnowledgeOrigin::Cache);
        assert_eq!(cached.faqs(), kb.faqs());
    }

    #[test]
    fn test_corrupt_cache_is_regenerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medical_faqs.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(KnowledgeBase::load(&path), Err(AppError::Internal(_))));
        let (kb, origin) = KnowledgeBase::initialize(&path);
        assert_eq!(origin, KnowledgeOrigin::Regenerated);
        assert_eq!(kb.len(), 7);
    }

    #[test]
    fn test_empty_cache_is_regenerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medical_faqs.json");
        fs::write(&path, "[]").unwrap();

        assert!(KnowledgeBase::load(&path).unwrap().is_empty());
        let (kb, origin) = KnowledgeBase::initialize(&path);
        assert_eq!(origin, KnowledgeOrigin::Regenerated);
        assert!(!kb.is_empty());
    }
}
