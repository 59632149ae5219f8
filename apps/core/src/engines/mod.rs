//! Domain engines built on the content tables.

pub mod cbt;
pub mod knowledge;
pub mod shifa;

pub use cbt::{CbtEngine, ExerciseRecommendation, ThoughtAnalysis};
pub use knowledge::{FaqHit, KnowledgeBase, KnowledgeStats};
pub use shifa::{PrayerGuidance, RemedyGuidance, ShifaEngine, ShifaGuidance};
