//! Category classification using keyword substrings.
//!
//! Fast, deterministic routing of a health question to one topical category.
//! Categories are checked in a fixed priority order; the first one with a
//! keyword contained in the lowercased text wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topical category of a health question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLabel {
    /// Anxiety, stress, mood
    MentalHealth,
    /// Aches and pains
    PainManagement,
    /// Fever, flu, infections
    AcuteIllness,
    /// Diabetes, blood pressure, heart
    ChronicCondition,
    /// Diet, exercise, weight
    Lifestyle,
    /// Default when nothing matches
    GeneralHealth,
}

impl CategoryLabel {
    /// All labels in classification priority order.
    pub const ALL: [CategoryLabel; 6] = [
        CategoryLabel::MentalHealth,
        CategoryLabel::PainManagement,
        CategoryLabel::AcuteIllness,
        CategoryLabel::ChronicCondition,
        CategoryLabel::Lifestyle,
        CategoryLabel::GeneralHealth,
    ];

    /// Returns the wire label of the category
    pub fn label(&self) -> &'static str {
        match self {
            CategoryLabel::MentalHealth => "mental_health",
            CategoryLabel::PainManagement => "pain_management",
            CategoryLabel::AcuteIllness => "acute_illness",
            CategoryLabel::ChronicCondition => "chronic_condition",
            CategoryLabel::Lifestyle => "lifestyle",
            CategoryLabel::GeneralHealth => "general_health",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CategoryLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CategoryLabel::ALL
            .into_iter()
            .find(|c| c.label() == wanted)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Ordered mapping from category to its trigger substrings.
pub type KeywordTable = Vec<(CategoryLabel, Vec<&'static str>)>;

/// The built-in routing table. `GeneralHealth` has no keywords; it is the default.
pub fn default_keyword_table() -> KeywordTable {
    vec![
        (
            CategoryLabel::MentalHealth,
            vec!["anxious", "anxiety", "stress", "worried", "depression", "mood", "mental"],
        ),
        (CategoryLabel::PainManagement, vec!["pain", "ache", "hurt", "sore"]),
        (
            CategoryLabel::AcuteIllness,
            vec!["fever", "cold", "flu", "cough", "infection"],
        ),
        (
            CategoryLabel::ChronicCondition,
            vec!["diabetes", "blood pressure", "heart", "chronic"],
        ),
        (
            CategoryLabel::Lifestyle,
            vec!["diet", "nutrition", "exercise", "weight", "healthy"],
        ),
    ]
}

/// Result of category classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Winning category
    pub category: CategoryLabel,
    /// The keyword that triggered it, `None` for the default
    pub matched_keyword: Option<String>,
}

/// Category classifier over an ordered keyword table
pub struct CategoryClassifier {
    table: KeywordTable,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryClassifier {
    /// Create a classifier with the built-in keyword table
    pub fn new() -> Self {
        Self::with_table(default_keyword_table())
    }

    pub fn with_table(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Classify text into exactly one category
    pub fn classify(&self, text: &str) -> CategoryLabel {
        self.classify_with_match(text).category
    }

    /// Classify and report which keyword decided the category
    pub fn classify_with_match(&self, text: &str) -> CategoryMatch {
        let text_lower = text.to_lowercase();

        for (category, keywords) in &self.table {
            if let Some(hit) = keywords.iter().find(|k| text_lower.contains(*k)) {
                return CategoryMatch {
                    category: *category,
                    matched_keyword: Some(hit.to_string()),
                };
            }
        }

        CategoryMatch {
            category: CategoryLabel::GeneralHealth,
            matched_keyword: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mental_health_detection() {
        let classifier = CategoryClassifier::new();

        assert_eq!(
            classifier.classify("I'm feeling very anxious and stressed"),
            CategoryLabel::MentalHealth
        );
        assert_eq!(classifier.classify("My MOOD is low"), CategoryLabel::MentalHealth);
    }

    #[test]
    fn test_each_category() {
        let classifier = CategoryClassifier::new();

        assert_eq!(classifier.classify("my knee hurts"), CategoryLabel::PainManagement);
        assert_eq!(classifier.classify("I caught the flu"), CategoryLabel::AcuteIllness);
        assert_eq!(
            classifier.classify("managing diabetes at work"),
            CategoryLabel::ChronicCondition
        );
        assert_eq!(classifier.classify("best diet for me"), CategoryLabel::Lifestyle);
    }

    #[test]
    fn test_default_category() {
        let classifier = CategoryClassifier::new();

        let result = classifier.classify_with_match("How much water should I drink?");
        assert_eq!(result.category, CategoryLabel::GeneralHealth);
        assert!(result.matched_keyword.is_none());
    }

    #[test]
    fn test_label_round_trip_through_from_str() {
        for label in CategoryLabel::ALL {
            assert_eq!(label.label().parse::<CategoryLabel>().unwrap(), label);
        }
        assert!("cardiology".parse::<CategoryLabel>().is_err());
    }
}
