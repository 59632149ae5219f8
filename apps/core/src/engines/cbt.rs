//! CBT coaching: exercise recommendation, thought analysis and daily tips.

use crate::brain::distortion::{balanced_thought, identify_distortions, DistortionMatch};
use crate::brain::scorer::recommend;
use crate::content::exercises::{Exercise, ExerciseType, BREATHING, FALLBACK_EXERCISE};
use crate::content::{ContentLibrary, Selection, SelectionKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Mood ratings at or below this widen the encouragement pool.
pub const LOW_MOOD_THRESHOLD: u8 = 3;

pub const ENCOURAGEMENTS: &[&str] = &[
    "Remember, healing is a journey, and every small step counts. You're taking care of yourself by trying this exercise.",
    "It's natural to feel this way, and you're not alone. This exercise can help you feel more grounded and peaceful.",
    "Your willingness to try coping strategies shows real strength. Be patient and gentle with yourself.",
    "Small actions can lead to big changes in how you feel. You're doing something positive for your wellbeing.",
    "Every time you practice these techniques, you're building resilience. Trust in your ability to heal and grow.",
];

pub const LOW_MOOD_ENCOURAGEMENTS: &[&str] = &[
    "I know things feel difficult right now. This exercise can help provide some relief and comfort.",
    "When we're struggling, even small steps toward feeling better are meaningful victories.",
];

pub const DEFAULT_ENCOURAGEMENT: &str =
    "Take a moment to breathe and center yourself. You deserve care and compassion.";

pub const DAILY_TIPS: &[&str] = &[
    "Notice your thoughts without judgment. Observe them like clouds passing in the sky.",
    "Challenge negative thoughts by asking: 'Is this thought helpful? Is it completely true?'",
    "Practice gratitude by naming three things you're thankful for today.",
    "Remember: feelings are temporary visitors, not permanent residents.",
    "Your thoughts don't define you. You have the power to choose which ones to believe.",
    "Small consistent actions create lasting change. What's one tiny step you can take today?",
    "Self-compassion is not self-indulgence. Treat yourself with the kindness you'd show a good friend.",
    "Progress isn't always linear. Setbacks are part of the healing journey.",
    "You can't control what happens to you, but you can control how you respond.",
    "Every time you use a coping skill, you're strengthening your emotional resilience.",
];

/// Symptoms drawn from when an exercise is requested without context.
pub const RANDOM_EXERCISE_SYMPTOMS: &[&str] = &["stress", "anxiety", "worry", "tension"];

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseRecommendation {
    pub id: String,
    #[serde(flatten)]
    pub exercise: Exercise,
    pub match_score: u32,
    pub selection: SelectionKind,
    pub encouragement: String,
}

impl ExerciseRecommendation {
    fn from_selection(selection: Selection<'_, Exercise>, encouragement: &str) -> Self {
        Self {
            id: selection.id.to_string(),
            exercise: selection.item.clone(),
            match_score: selection.match_score,
            selection: selection.kind,
            encouragement: encouragement.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThoughtAnalysis {
    pub original_thought: String,
    pub distortions: Vec<DistortionMatch>,
    pub balanced_thought: String,
}

/// Encouragement candidates for a mood rating.
pub fn encouragement_pool(mood: Option<u8>) -> Vec<&'static str> {
    let mut pool = ENCOURAGEMENTS.to_vec();
    if mood.is_some_and(|m| m <= LOW_MOOD_THRESHOLD) {
        pool.extend_from_slice(LOW_MOOD_ENCOURAGEMENTS);
    }
    pool
}

pub struct CbtEngine {
    library: Arc<ContentLibrary>,
}

impl CbtEngine {
    pub fn new(library: Arc<ContentLibrary>) -> Self {
        Self { library }
    }

    /// Best exercise for the symptoms, with an encouragement suited to the mood.
    ///
    /// A table error degrades to the default breathing exercise.
    pub fn recommend_exercise<R: Rng + ?Sized>(
        &self,
        symptoms: &[String],
        mood: Option<u8>,
        rng: &mut R,
    ) -> ExerciseRecommendation {
        match recommend(symptoms, &self.library.exercises) {
            Ok(selection) => {
                debug!(
                    exercise = selection.id,
                    score = selection.match_score,
                    "Exercise selected"
                );
                let pool = encouragement_pool(mood);
                let encouragement = pool.choose(rng).copied().unwrap_or(DEFAULT_ENCOURAGEMENT);
                ExerciseRecommendation::from_selection(selection, encouragement)
            }
            Err(e) => {
                warn!("Exercise recommendation failed, using default: {}", e);
                Self::default_exercise()
            }
        }
    }

    /// The exercise stored under a requested type, if the table has one.
    pub fn exercise_of_type<R: Rng + ?Sized>(
        &self,
        exercise_type: ExerciseType,
        rng: &mut R,
    ) -> Option<ExerciseRecommendation> {
        let (id, item) = self.library.exercises.entry(exercise_type.as_str())?;
        let encouragement = ENCOURAGEMENTS.choose(rng).copied().unwrap_or(DEFAULT_ENCOURAGEMENT);
        Some(ExerciseRecommendation::from_selection(
            Selection {
                id,
                item,
                match_score: 0,
                kind: SelectionKind::Direct,
            },
            encouragement,
        ))
    }

    /// Recommendation for one symptom drawn from a small general-purpose set.
    pub fn random_exercise<R: Rng + ?Sized>(&self, rng: &mut R) -> ExerciseRecommendation {
        let symptom = RANDOM_EXERCISE_SYMPTOMS
            .choose(rng)
            .copied()
            .unwrap_or("stress");
        self.recommend_exercise(&[symptom.to_string()], None, rng)
    }

    pub fn default_exercise() -> ExerciseRecommendation {
        ExerciseRecommendation {
            id: FALLBACK_EXERCISE.to_string(),
            exercise: BREATHING,
            match_score: 0,
            selection: SelectionKind::Default,
            encouragement: DEFAULT_ENCOURAGEMENT.to_string(),
        }
    }

    pub fn daily_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        DAILY_TIPS.choose(rng).copied().unwrap_or(DAILY_TIPS[0])
    }

    pub fn analyze_thought(thought: &str) -> ThoughtAnalysis {
        let distortions = identify_distortions(thought);
        let balanced = balanced_thought(&distortions).to_string();
        ThoughtAnalysis {
            original_thought: thought.to_string(),
            distortions,
            balanced_thought: balanced,
        }
    }
}
