//! Scorer Tests
//!
//! Properties of tag-overlap recommendation over the builtin exercise table.

use crate::brain::keywords::KeywordExtractor;
use crate::brain::scorer::{recommend, score_all, score_item};
use crate::content::exercises::FALLBACK_EXERCISE;
use crate::content::{exercise_table, SelectionKind};

fn tags(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Every single-word tag drawn from the extractor vocabulary plus the table's own triggers.
fn sample_tags() -> Vec<String> {
    let table = exercise_table();
    let mut words: Vec<String> = KeywordExtractor::new().extract(
        "pain ache fever headache nausea vomiting diarrhea constipation fatigue tired dizzy \
         breath cough cold flu infection diabetes blood pressure heart chest stomach back joint \
         muscle skin rash allergy anxiety depression stress sleep insomnia",
    );
    for (_, exercise) in table.iter() {
        words.extend(exercise.best_for.iter().map(|t| t.to_string()));
    }
    words.extend(tags(&["xyz", "tax", "a", "ten", "Worry"]));
    words
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_result_always_in_table() {
        let table = exercise_table();
        let ids = table.ids();

        for tag in sample_tags() {
            let selection = recommend(&[tag.clone()], &table).unwrap();
            assert!(ids.contains(&selection.id), "'{}' selected unknown id {}", tag, selection.id);
            assert_eq!(table.get(selection.id), Some(selection.item));
        }
    }

    #[test]
    fn test_winner_has_maximum_score() {
        let table = exercise_table();

        for tag in sample_tags() {
            let input = [tag.clone()];
            let selection = recommend(&input, &table).unwrap();
            let best = score_all(&input, &table)
                .into_iter()
                .map(|(_, score)| score)
                .max()
                .unwrap();
            assert_eq!(selection.match_score, best, "tag '{}'", tag);
        }
    }

    #[test]
    fn test_zero_overlap_returns_fallback() {
        let table = exercise_table();

        for input in [tags(&["xyz"]), tags(&["qqqq", "zzzz"]), tags(&["rash"])] {
            let selection = recommend(&input, &table).unwrap();
            assert_eq!(selection.id, FALLBACK_EXERCISE);
            assert_eq!(selection.match_score, 0);
            assert_eq!(selection.kind, SelectionKind::Fallback);
        }
    }

    #[test]
    fn test_exact_anxiety_scores_at_least_two() {
        let table = exercise_table();
        let input = tags(&["anxiety"]);

        for (id, exercise) in table.iter() {
            if exercise.best_for.contains(&"anxiety") {
                // exact bonus plus the substring hit on the same trigger
                assert!(score_item(&input, exercise) >= 3, "{}", id);
            }
        }
    }

    #[test]
    fn test_double_counting_is_preserved() {
        let table = exercise_table();
        let breathing = table.get("breathing").unwrap();

        // "anxiety" and "stress" are both exact triggers: (2 + 1) each
        assert_eq!(score_item(&tags(&["anxiety", "stress"]), breathing), 6);
    }

    #[test]
    fn test_scores_are_deterministic() {
        let table = exercise_table();
        let input = tags(&["anxiety", "sleep", "worry"]);

        let first = score_all(&input, &table);
        let second = score_all(&input, &table);
        assert_eq!(first, second);
        assert_eq!(
            recommend(&input, &table).unwrap().id,
            recommend(&input, &table).unwrap().id
        );
    }

    #[test]
    fn test_ties_follow_table_order() {
        let table = exercise_table();
        // breathing and progressive_relaxation both list stress and sleep
        let selection = recommend(&tags(&["stress", "sleep"]), &table).unwrap();
        assert_eq!(selection.id, "breathing");

        let scores = score_all(&tags(&["stress", "sleep"]), &table);
        let breathing = scores.iter().find(|(id, _)| *id == "breathing").unwrap().1;
        let relaxation = scores
            .iter()
            .find(|(id, _)| *id == "progressive_relaxation")
            .unwrap()
            .1;
        assert_eq!(breathing, relaxation);
    }
}
