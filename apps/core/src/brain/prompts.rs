//! Prompt text and per-category answer extras for the medical model.

use super::category::CategoryLabel;

const BASE_SYSTEM_PROMPT: &str = "You are Dr. Shifa, a compassionate AI medical assistant. Your role is to:

1. Provide accurate, evidence-based medical information
2. Use an empathetic, hopeful, and supportive tone
3. Always encourage seeking professional medical care when appropriate
4. Never provide definitive diagnoses or replace professional medical advice
5. Focus on general health education and guidance

Guidelines:
- Be warm and understanding in your responses
- Acknowledge the person's concerns with empathy
- Provide practical, actionable advice when appropriate
- Always emphasize the importance of consulting healthcare professionals
- Use accessible language that's easy to understand
- Maintain a hopeful and encouraging tone

Remember: You are providing health education and support, not medical diagnosis or treatment.";

pub const FALLBACK_ANSWER: &str = "I apologize, but I'm currently unable to process your question. Please consult with a healthcare professional for medical advice. Your health and well-being are important, and a qualified medical provider can give you the personalized care you deserve.";

pub const MEDICAL_DISCLAIMER: &str = "Medical Disclaimer: This AI provides general information only. Always consult qualified healthcare professionals for medical advice, diagnosis, or treatment. In emergencies, contact emergency services immediately.";

/// Base prompt plus the category's focus sentence.
pub fn system_prompt(category: CategoryLabel) -> String {
    let suffix = match category {
        CategoryLabel::MentalHealth => {
            " Pay special attention to mental wellness and emotional support. Be extra compassionate and consider suggesting professional mental health resources."
        }
        CategoryLabel::PainManagement => {
            " Focus on safe, evidence-based pain management strategies. Emphasize the importance of proper medical evaluation for persistent pain."
        }
        CategoryLabel::AcuteIllness => {
            " Provide guidance on when to seek immediate medical care. Focus on symptom management and recovery support."
        }
        CategoryLabel::ChronicCondition => {
            " Emphasize lifestyle management and the importance of working with healthcare providers for ongoing care."
        }
        CategoryLabel::Lifestyle => {
            " Focus on evidence-based lifestyle recommendations and sustainable health habits."
        }
        CategoryLabel::GeneralHealth => "",
    };
    format!("{}{}", BASE_SYSTEM_PROMPT, suffix)
}

pub fn follow_up_questions(category: CategoryLabel) -> &'static [&'static str] {
    match category {
        CategoryLabel::MentalHealth => &[
            "Would you like some breathing exercises to help with anxiety?",
            "Have you considered speaking with a mental health professional?",
            "Are you interested in learning about stress management techniques?",
        ],
        CategoryLabel::PainManagement => &[
            "How long have you been experiencing this pain?",
            "Would you like to learn about gentle exercises that might help?",
            "Have you tried any pain management techniques before?",
        ],
        CategoryLabel::AcuteIllness => &[
            "Are your symptoms getting worse or staying the same?",
            "Do you have any other concerning symptoms?",
            "Would you like guidance on when to seek medical care?",
        ],
        CategoryLabel::ChronicCondition => &[
            "How are you managing your condition day-to-day?",
            "Would you like tips for lifestyle modifications?",
            "Are you working with a healthcare team?",
        ],
        CategoryLabel::Lifestyle => &[
            "Would you like a personalized wellness plan?",
            "Are you interested in specific dietary recommendations?",
            "Do you need help setting realistic health goals?",
        ],
        CategoryLabel::GeneralHealth => &[
            "Is there anything specific about your symptoms you'd like to discuss?",
            "Would you like some general wellness tips?",
            "Do you have other health concerns you'd like to explore?",
        ],
    }
}

pub fn recommended_sources(category: CategoryLabel) -> &'static [&'static str] {
    match category {
        CategoryLabel::MentalHealth => &[
            "National Institute of Mental Health (NIMH)",
            "American Psychological Association (APA)",
            "Mental Health America",
        ],
        CategoryLabel::PainManagement => &[
            "American Pain Society",
            "International Association for the Study of Pain",
            "CDC Pain Management Guidelines",
        ],
        CategoryLabel::ChronicCondition => &[
            "American Heart Association",
            "American Diabetes Association",
            "Centers for Disease Control and Prevention",
        ],
        _ => &["Mayo Clinic", "WebMD", "Healthline", "Your healthcare provider"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_health_has_no_suffix() {
        assert_eq!(system_prompt(CategoryLabel::GeneralHealth), BASE_SYSTEM_PROMPT);
        assert!(system_prompt(CategoryLabel::MentalHealth).ends_with("mental health resources."));
    }

    #[test]
    fn test_every_category_has_three_follow_ups() {
        for category in CategoryLabel::ALL {
            assert_eq!(follow_up_questions(category).len(), 3);
        }
    }

    #[test]
    fn test_sources_fall_back_to_general_set() {
        assert_eq!(recommended_sources(CategoryLabel::Lifestyle).len(), 4);
        assert_eq!(recommended_sources(CategoryLabel::AcuteIllness)[0], "Mayo Clinic");
        assert_eq!(
            recommended_sources(CategoryLabel::PainManagement)[0],
            "American Pain Society"
        );
    }
}
