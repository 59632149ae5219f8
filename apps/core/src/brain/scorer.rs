//! Tag-overlap recommendation scoring.
//!
//! Each input tag adds 2 points per trigger tag it equals, and 1 point per
//! trigger tag that contains it or is contained by it. An exact match therefore
//! counts 3. Ties go to the earliest entry in table order.

use crate::content::table::{ContentTable, Selection, SelectionKind, Tagged};
use crate::error::AppError;
use tracing::debug;

const EXACT_MATCH_POINTS: u32 = 2;
const PARTIAL_MATCH_POINTS: u32 = 1;

/// Score of one item against lowercased tags.
pub fn score_item<T: Tagged>(tags: &[String], item: &T) -> u32 {
    let mut score = 0;
    for tag in tags {
        for trigger in item.trigger_tags() {
            if tag == trigger {
                score += EXACT_MATCH_POINTS;
            }
            if trigger.contains(tag.as_str()) || tag.contains(trigger) {
                score += PARTIAL_MATCH_POINTS;
            }
        }
    }
    score
}

/// Scores for every entry, in table order.
#[cfg(test)]
pub fn score_all<'t, T: Tagged>(tags: &[String], table: &'t ContentTable<T>) -> Vec<(&'t str, u32)> {
    let tags = normalize(tags, table);
    table
        .iter()
        .map(|(id, item)| (id, score_item(&tags, item)))
        .collect()
}

/// Highest scoring entry, or the table's fallback when nothing overlaps.
///
/// An empty tag list is replaced by the table's default tags. An empty table
/// is a configuration error.
pub fn recommend<'t, T: Tagged>(
    tags: &[String],
    table: &'t ContentTable<T>,
) -> Result<Selection<'t, T>, AppError> {
    if table.is_empty() {
        return Err(AppError::Config(format!(
            "{} table is empty; nothing to recommend",
            table.name()
        )));
    }

    let tags = normalize(tags, table);

    let mut best: Option<(&str, &T, u32)> = None;
    for (id, item) in table.iter() {
        let score = score_item(&tags, item);
        // Strictly greater keeps the earliest entry on ties.
        if best.map_or(true, |(_, _, top)| score > top) {
            best = Some((id, item, score));
        }
    }

    match best {
        Some((id, item, score)) if score > 0 => {
            debug!(table = table.name(), id, score, "Scored recommendation");
            Ok(Selection {
                id,
                item,
                match_score: score,
                kind: SelectionKind::Scored,
            })
        }
        _ => {
            let (id, item) = table.fallback()?;
            debug!(table = table.name(), id, "No tag overlap, using fallback");
            Ok(Selection {
                id,
                item,
                match_score: 0,
                kind: SelectionKind::Fallback,
            })
        }
    }
}

fn normalize<T>(tags: &[String], table: &ContentTable<T>) -> Vec<String> {
    let source = if tags.is_empty() {
        table.default_tags()
    } else {
        tags
    };
    source
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static [&'static str]);

    impl Tagged for Item {
        fn trigger_tags(&self) -> &[&'static str] {
            self.0
        }
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_counts_three() {
        let item = Item(&["anxiety", "sleep"]);
        assert_eq!(score_item(&tags(&["anxiety"]), &item), 3);
    }

    #[test]
    fn test_partial_match_both_directions() {
        let item = Item(&["muscle_tension"]);
        assert_eq!(score_item(&tags(&["tension"]), &item), 1);

        let item = Item(&["worry"]);
        assert_eq!(score_item(&tags(&["worrying"]), &item), 1);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let item = Item(&["depression"]);
        assert_eq!(score_item(&tags(&["fever"]), &item), 0);
        assert_eq!(score_item(&[], &item), 0);
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let table = ContentTable::new(
            "t",
            vec![("first", Item(&["stress"])), ("second", Item(&["stress"]))],
            "second",
        );
        let pick = recommend(&tags(&["stress"]), &table).unwrap();
        assert_eq!(pick.id, "first");
        assert_eq!(pick.kind, SelectionKind::Scored);
    }

    #[test]
    fn test_zero_scores_use_fallback() {
        let table = ContentTable::new(
            "t",
            vec![("a", Item(&["sleep"])), ("b", Item(&["panic"]))],
            "b",
        );
        let pick = recommend(&tags(&["fever"]), &table).unwrap();
        assert_eq!(pick.id, "b");
        assert_eq!(pick.match_score, 0);
        assert_eq!(pick.kind, SelectionKind::Fallback);
    }

    #[test]
    fn test_empty_tags_use_default_tags() {
        let table = ContentTable::new(
            "t",
            vec![("a", Item(&["sleep"])), ("b", Item(&["stress"]))],
            "a",
        )
        .with_default_tags(&["stress"]);
        let pick = recommend(&[], &table).unwrap();
        assert_eq!(pick.id, "b");
        assert_eq!(pick.match_score, 3);
    }

    #[test]
    fn test_tags_are_case_insensitive() {
        let table = ContentTable::new("t", vec![("a", Item(&["panic"]))], "a");
        let pick = recommend(&tags(&["PANIC"]), &table).unwrap();
        assert_eq!(pick.match_score, 3);
    }

    #[test]
    fn test_empty_table_is_a_config_error() {
        let table: ContentTable<Item> = ContentTable::new("t", vec![], "a");
        assert!(matches!(
            recommend(&tags(&["stress"]), &table),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_score_all_keeps_order() {
        let table = ContentTable::new(
            "t",
            vec![("a", Item(&["sleep"])), ("b", Item(&["stress", "sleep"]))],
            "a",
        );
        assert_eq!(score_all(&tags(&["sleep"]), &table), vec![("a", 3), ("b", 3)]);
    }
}
