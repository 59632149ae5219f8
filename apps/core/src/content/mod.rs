//! Static content: exercises, prayers, remedies, compliance lists and FAQs.
//!
//! Tables are built once at startup and only read afterwards.

pub mod compliance;
pub mod exercises;
pub mod faq;
pub mod prayers;
pub mod remedies;
pub mod table;

pub use compliance::{verify_compliance, ComplianceVerdict};
pub use exercises::{exercise_table, Exercise, ExerciseType};
pub use prayers::{prayer_table, HealingPrayer};
pub use remedies::{remedy_table, Remedy};
pub use table::{ContentTable, Selection, SelectionKind};

use crate::error::AppError;
use serde::Serialize;
use tracing::info;

/// Every read-only recommendation table the service consults.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    pub exercises: ContentTable<Exercise>,
    pub prayers: ContentTable<HealingPrayer>,
    pub remedies: ContentTable<Remedy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibrarySizes {
    pub exercises: usize,
    pub prayers: usize,
    pub remedies: usize,
}

impl ContentLibrary {
    /// The built-in tables, validated.
    pub fn load() -> Result<Self, AppError> {
        Self::from_tables(exercise_table(), prayer_table(), remedy_table())
    }

    pub fn from_tables(
        exercises: ContentTable<Exercise>,
        prayers: ContentTable<HealingPrayer>,
        remedies: ContentTable<Remedy>,
    ) -> Result<Self, AppError> {
        exercises.validate()?;
        prayers.validate()?;
        remedies.validate()?;

        let library = Self {
            exercises,
            prayers,
            remedies,
        };
        let sizes = library.sizes();
        info!(
            exercises = sizes.exercises,
            prayers = sizes.prayers,
            remedies = sizes.remedies,
            "Content library loaded"
        );
        Ok(library)
    }

    pub fn sizes(&self) -> LibrarySizes {
        LibrarySizes {
            exercises: self.exercises.len(),
            prayers: self.prayers.len(),
            remedies: self.remedies.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library_loads() {
        let library = ContentLibrary::load().unwrap();
        assert_eq!(
            library.sizes(),
            LibrarySizes {
                exercises: 5,
                prayers: 6,
                remedies: 5
            }
        );
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let result = ContentLibrary::from_tables(
            ContentTable::new("exercises", vec![], "breathing"),
            prayer_table(),
            remedy_table(),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
