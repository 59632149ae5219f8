//! CBT exercise library.

use super::table::{ContentTable, Tagged};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const FALLBACK_EXERCISE: &str = "breathing";

/// Tags assumed when a request names no symptoms.
pub const DEFAULT_SYMPTOMS: &[&str] = &["stress"];

/// Kinds of CBT exercise a caller may ask for by name.
///
/// Not every kind has a table entry yet; asking for one without an entry
/// falls back to a scored recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Breathing,
    Grounding,
    ThoughtRecord,
    BehavioralActivation,
    Mindfulness,
    ProgressiveRelaxation,
    CognitiveRestructuring,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 7] = [
        ExerciseType::Breathing,
        ExerciseType::Grounding,
        ExerciseType::ThoughtRecord,
        ExerciseType::BehavioralActivation,
        ExerciseType::Mindfulness,
        ExerciseType::ProgressiveRelaxation,
        ExerciseType::CognitiveRestructuring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Breathing => "breathing",
            ExerciseType::Grounding => "grounding",
            ExerciseType::ThoughtRecord => "thought_record",
            ExerciseType::BehavioralActivation => "behavioral_activation",
            ExerciseType::Mindfulness => "mindfulness",
            ExerciseType::ProgressiveRelaxation => "progressive_relaxation",
            ExerciseType::CognitiveRestructuring => "cognitive_restructuring",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExerciseType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = ExerciseType::ALL.iter().map(|t| t.as_str()).collect();
                format!(
                    "Invalid exercise type '{}'. Valid types: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
    pub duration: &'static str,
    pub best_for: &'static [&'static str],
}

impl Tagged for Exercise {
    fn trigger_tags(&self) -> &[&'static str] {
        self.best_for
    }
}

/// The fallback exercise, also used when a recommendation cannot be made.
pub const BREATHING: Exercise = Exercise {
    name: "4-7-8 Breathing Technique",
    description: "A calming breathing exercise to reduce anxiety and stress",
    steps: &[
        "Sit or lie down in a comfortable position",
        "Place one hand on your chest, one on your belly",
        "Breathe in through your nose for 4 counts",
        "Hold your breath for 7 counts",
        "Exhale slowly through your mouth for 8 counts",
        "Repeat this cycle 3-4 times",
    ],
    duration: "3-5 minutes",
    best_for: &["anxiety", "stress", "sleep", "panic"],
};

pub fn exercise_table() -> ContentTable<Exercise> {
    ContentTable::new(
        "exercises",
        vec![
            ("breathing", BREATHING),
            (
                "grounding",
                Exercise {
                    name: "5-4-3-2-1 Grounding Technique",
                    description: "A mindfulness exercise to anchor yourself in the present moment",
                    steps: &[
                        "Notice 5 things you can see around you",
                        "Notice 4 things you can touch or feel",
                        "Notice 3 things you can hear",
                        "Notice 2 things you can smell",
                        "Notice 1 thing you can taste",
                    ],
                    duration: "2-3 minutes",
                    best_for: &["anxiety", "panic", "dissociation", "overwhelm"],
                },
            ),
            (
                "thought_record",
                Exercise {
                    name: "Simple Thought Record",
                    description: "Examine and challenge negative thought patterns",
                    steps: &[
                        "Identify the situation that triggered your distress",
                        "Write down your automatic thoughts",
                        "Rate your emotion intensity (1-10)",
                        "Identify any thinking errors or distortions",
                        "Generate a more balanced, realistic thought",
                        "Re-rate your emotion intensity",
                    ],
                    duration: "10-15 minutes",
                    best_for: &["depression", "anxiety", "negative_thinking", "worry"],
                },
            ),
            (
                "progressive_relaxation",
                Exercise {
                    name: "Progressive Muscle Relaxation",
                    description:
                        "Systematically tense and relax muscle groups to reduce physical tension",
                    steps: &[
                        "Find a quiet, comfortable place to sit or lie down",
                        "Start with your toes - tense for 5 seconds, then relax",
                        "Move up to your calves - tense and relax",
                        "Continue with thighs, buttocks, abdomen, hands, arms, shoulders",
                        "Finish with facial muscles and scalp",
                        "Notice the difference between tension and relaxation",
                    ],
                    duration: "15-20 minutes",
                    best_for: &["stress", "muscle_tension", "sleep", "anxiety"],
                },
            ),
            (
                "behavioral_activation",
                Exercise {
                    name: "Pleasant Activity Scheduling",
                    description: "Plan enjoyable activities to improve mood and motivation",
                    steps: &[
                        "List activities you used to enjoy or think you might enjoy",
                        "Rate each activity for pleasure (1-10) and mastery (1-10)",
                        "Choose 1-2 activities for this week",
                        "Schedule specific times for these activities",
                        "After completing, rate your actual pleasure and sense of achievement",
                        "Plan the next week based on what worked",
                    ],
                    duration: "20-30 minutes planning",
                    best_for: &["depression", "low_motivation", "isolation", "anhedonia"],
                },
            ),
        ],
        FALLBACK_EXERCISE,
    )
    .with_default_tags(DEFAULT_SYMPTOMS)
}
