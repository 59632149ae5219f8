//! Curated medical FAQ records.

use crate::brain::keywords::clean_text;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
    #[serde(default = "unknown_source")]
    pub source: String,
    #[serde(default = "general_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

fn unknown_source() -> String {
    "Unknown".to_string()
}

fn general_category() -> String {
    "general_health".to_string()
}

const CURATED: &[(&str, &str, &str, &str)] = &[
    (
        "What are the common symptoms of flu?",
        "Common flu symptoms include fever, chills, muscle aches, cough, congestion, runny nose, headaches, and fatigue. Symptoms typically appear 1-4 days after exposure to the virus.",
        "Mayo Clinic",
        "acute_illness",
    ),
    (
        "How can I manage high blood pressure naturally?",
        "Natural approaches to managing blood pressure include maintaining a healthy weight, eating a balanced diet low in sodium, exercising regularly, limiting alcohol, managing stress, and getting adequate sleep.",
        "Mayo Clinic",
        "chronic_condition",
    ),
    (
        "What should I do if I have persistent headaches?",
        "For persistent headaches, keep a headache diary, maintain regular sleep patterns, stay hydrated, manage stress, and avoid known triggers. Consult a healthcare provider if headaches worsen or occur frequently.",
        "Mayo Clinic",
        "pain_management",
    ),
    (
        "How do I know if I have anxiety?",
        "Anxiety symptoms include excessive worry, restlessness, fatigue, difficulty concentrating, irritability, muscle tension, and sleep problems. If these symptoms persist and interfere with daily life, consider speaking with a healthcare professional.",
        "WebMD",
        "mental_health",
    ),
    (
        "What are healthy ways to lose weight?",
        "Healthy weight loss involves creating a moderate caloric deficit through balanced nutrition and regular physical activity. Focus on whole foods, portion control, staying hydrated, and gradual sustainable changes.",
        "WebMD",
        "lifestyle",
    ),
    (
        "What foods help boost immune system?",
        "Immune-boosting foods include citrus fruits (vitamin C), yogurt (probiotics), garlic, ginger, spinach, almonds, turmeric, and green tea. A balanced diet with variety supports overall immune function.",
        "Healthline",
        "lifestyle",
    ),
    (
        "How much sleep do adults need?",
        "Most adults need 7-9 hours of sleep per night. Quality sleep supports immune function, mental health, physical recovery, and cognitive performance. Consistent sleep schedules help maintain healthy sleep patterns.",
        "Healthline",
        "general_health",
    ),
];

/// The curated records, in source order.
pub fn curated_faqs() -> Vec<FaqRecord> {
    CURATED
        .iter()
        .map(|(question, answer, source, category)| FaqRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            source: source.to_string(),
            category: category.to_string(),
            keywords: Vec::new(),
        })
        .collect()
}

/// Clean question and answer text and drop records left without either.
pub fn preprocess(records: Vec<FaqRecord>) -> Vec<FaqRecord> {
    records
        .into_iter()
        .map(|record| FaqRecord {
            question: clean_text(&record.question),
            answer: clean_text(&record.answer),
            ..record
        })
        .filter(|record| !record.question.is_empty() && !record.answer.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_records() {
        let faqs = curated_faqs();
        assert_eq!(faqs.len(), 7);
        assert_eq!(faqs[0].source, "Mayo Clinic");
        assert_eq!(faqs[6].category, "general_health");
    }

    #[test]
    fn test_preprocess_drops_blank_records() {
        let mut records = curated_faqs();
        records.push(FaqRecord {
            question: "   ".to_string(),
            answer: "Something".to_string(),
            source: "Test".to_string(),
            category: "lifestyle".to_string(),
            keywords: Vec::new(),
        });
        let cleaned = preprocess(records);
        assert_eq!(cleaned.len(), 7);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: FaqRecord =
            serde_json::from_str(r#"{"question": "Q?", "answer": "A."}"#).unwrap();
        assert_eq!(record.source, "Unknown");
        assert_eq!(record.category, "general_health");
        assert!(record.keywords.is_empty());
    }
}
