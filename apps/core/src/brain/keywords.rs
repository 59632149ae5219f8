//! Medical keyword extraction and input normalisation.
//!
//! Keywords are found by substring match against a fixed vocabulary and are
//! returned in vocabulary order. They are the tags fed to the recommendation scorer.

use regex::Regex;
use std::sync::LazyLock;

/// Vocabulary of symptom and condition words, in extraction order
const MEDICAL_KEYWORDS: &[&str] = &[
    "pain",
    "ache",
    "fever",
    "headache",
    "nausea",
    "vomiting",
    "diarrhea",
    "constipation",
    "fatigue",
    "tired",
    "dizzy",
    "breath",
    "cough",
    "cold",
    "flu",
    "infection",
    "diabetes",
    "blood pressure",
    "heart",
    "chest",
    "stomach",
    "back",
    "joint",
    "muscle",
    "skin",
    "rash",
    "allergy",
    "anxiety",
    "depression",
    "stress",
    "sleep",
    "insomnia",
];

// NOTE: expect() is acceptable here: the patterns are literals.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s\-.,!?;:()'"/]"#).expect("Invalid regex: disallowed characters")
});

/// Keyword extractor over a fixed medical vocabulary
pub struct KeywordExtractor {
    vocabulary: Vec<&'static str>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create an extractor with the built-in vocabulary
    pub fn new() -> Self {
        Self {
            vocabulary: MEDICAL_KEYWORDS.to_vec(),
        }
    }

    /// Every vocabulary word contained in the lowercased text
    pub fn extract(&self, text: &str) -> Vec<String> {
        let text_lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|keyword| text_lower.contains(**keyword))
            .map(|keyword| keyword.to_string())
            .collect()
    }
}

/// Collapse whitespace and drop characters that interfere with processing.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let collapsed = WHITESPACE_RUN.replace_all(text.trim(), " ");
    DISALLOWED_CHARS.replace_all(&collapsed, "").into_owned()
}

/// Non-blank and at most `max_length` characters.
pub fn validate_input(text: &str, max_length: usize) -> bool {
    !text.trim().is_empty() && text.chars().count() <= max_length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_keeps_vocabulary_order() {
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("Stress gives me a headache and chest pain");
        assert_eq!(keywords, vec!["pain", "ache", "headache", "chest", "stress"]);
    }

    #[test]
    fn test_anxious_is_not_anxiety() {
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("I'm feeling very anxious and stressed");
        assert_eq!(keywords, vec!["stress"]);
    }

    #[test]
    fn test_no_keywords() {
        let extractor = KeywordExtractor::new();

        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("what should I eat today").is_empty());
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  hello   world \n again "), "hello world again");
        assert_eq!(clean_text("fever @ 39°C #help"), "fever  39C help");
        assert_eq!(clean_text("What's up? (really)"), "What's up? (really)");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_validate_input() {
        assert!(validate_input("Is honey good for a cough?", 2000));
        assert!(!validate_input("", 2000));
        assert!(!validate_input("   \t ", 2000));
        assert!(!validate_input("abcdef", 5));
        assert!(validate_input("abcde", 5));
    }
}
