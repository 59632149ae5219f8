//! Cognitive distortion detection for CBT thought records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveDistortion {
    AllOrNothing,
    Overgeneralization,
    MentalFilter,
    JumpingToConclusions,
    ShouldStatements,
    EmotionalReasoning,
    Labeling,
    Magnification,
}

impl CognitiveDistortion {
    pub fn description(&self) -> &'static str {
        match self {
            Self::AllOrNothing => "Seeing things in black and white, with no middle ground",
            Self::Overgeneralization => "Drawing broad conclusions from single events",
            Self::MentalFilter => "Focusing only on negative details while ignoring positives",
            Self::JumpingToConclusions => "Making negative assumptions without evidence",
            Self::ShouldStatements => {
                "Using 'should', 'must', or 'have to' statements that create pressure"
            }
            Self::EmotionalReasoning => "Believing that negative emotions reflect reality",
            Self::Labeling => "Putting negative labels on yourself or others",
            Self::Magnification => {
                "Exaggerating the importance of problems or minimizing positives"
            }
        }
    }

    /// Reframing question offered for this distortion
    pub fn balanced_prompt(&self) -> &'static str {
        match self {
            Self::AllOrNothing => {
                "What's a more nuanced way to view this? Are there any exceptions or middle ground?"
            }
            Self::Overgeneralization => {
                "Is this always true, or are there times when it's different?"
            }
            Self::MentalFilter => "What positives or neutrals am I overlooking in this situation?",
            Self::JumpingToConclusions => {
                "What evidence do I have for this? What other explanations are possible?"
            }
            Self::ShouldStatements => "What would be more realistic or compassionate expectations?",
            Self::EmotionalReasoning => {
                "What would I think about this if I were feeling differently?"
            }
            Self::Labeling => {
                "What specific behaviors or situations am I dealing with, rather than labels?"
            }
            Self::Magnification => {
                "How might this look in a week, month, or year? What's the realistic impact?"
            }
        }
    }
}

/// Detection order and the phrases that reveal each distortion.
const DISTORTION_PATTERNS: &[(CognitiveDistortion, &[&str])] = &[
    (
        CognitiveDistortion::AllOrNothing,
        &["always", "never", "completely", "totally", "everything", "nothing"],
    ),
    (
        CognitiveDistortion::Overgeneralization,
        &["everyone", "no one", "all the time", "every time"],
    ),
    (CognitiveDistortion::MentalFilter, &["only", "just", "nothing but"]),
    (
        CognitiveDistortion::JumpingToConclusions,
        &["probably", "must be", "certainly", "obviously"],
    ),
    (
        CognitiveDistortion::ShouldStatements,
        &["should", "must", "have to", "need to", "supposed to"],
    ),
    (
        CognitiveDistortion::EmotionalReasoning,
        &["feel like", "feels", "seems like"],
    ),
    (
        CognitiveDistortion::Labeling,
        &[
            "i am", "they are", "he is", "she is", "stupid", "failure", "loser", "terrible",
        ],
    ),
    (
        CognitiveDistortion::Magnification,
        &["huge", "enormous", "disaster", "catastrophe", "awful", "terrible"],
    ),
];

const GENERIC_REFRAME: &str =
    "Try looking at this situation from different perspectives. What would you tell a friend in this situation?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistortionMatch {
    #[serde(rename = "type")]
    pub distortion: CognitiveDistortion,
    pub description: String,
    pub pattern_found: String,
}

/// Each distortion is reported once, with the first of its patterns found.
pub fn identify_distortions(thought: &str) -> Vec<DistortionMatch> {
    let thought_lower = thought.to_lowercase();

    DISTORTION_PATTERNS
        .iter()
        .filter_map(|(distortion, patterns)| {
            patterns
                .iter()
                .find(|p| thought_lower.contains(**p))
                .map(|p| DistortionMatch {
                    distortion: *distortion,
                    description: distortion.description().to_string(),
                    pattern_found: p.to_string(),
                })
        })
        .collect()
}

/// Reframing prompt for the first detected distortion.
pub fn balanced_thought(distortions: &[DistortionMatch]) -> &'static str {
    distortions
        .first()
        .map(|d| d.distortion.balanced_prompt())
        .unwrap_or(GENERIC_REFRAME)
}
