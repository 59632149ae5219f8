//! In-memory activity log for an interactive demo session.
//!
//! Entries are appended in order and dropped when the process exits.

use crate::assembler::AssembledResponse;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Kind of activity completed in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    MedicalQuery,
    CbtExercise,
    HealingPrayer,
    PropheticRemedy,
    ComplianceCheck,
    KnowledgeSearch,
    DailyTips,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::MedicalQuery => "medical_query",
            ActivityKind::CbtExercise => "cbt_exercise",
            ActivityKind::HealingPrayer => "healing_prayer",
            ActivityKind::PropheticRemedy => "prophetic_remedy",
            ActivityKind::ComplianceCheck => "compliance_check",
            ActivityKind::KnowledgeSearch => "knowledge_search",
            ActivityKind::DailyTips => "daily_tips",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed activity
#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry {
    /// Time the activity completed
    pub timestamp: DateTime<Local>,
    pub activity: ActivityKind,
    /// Salient fields, in insertion order
    pub details: Vec<(String, String)>,
}

impl SessionEntry {
    #[cfg(test)]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
pub struct SessionLog {
    entries: Vec<SessionEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<K, V>(&mut self, activity: ActivityKind, details: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.push(SessionEntry {
            timestamp: Local::now(),
            activity,
            details: details
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
    }

    /// Summary entry for an assembled answer.
    pub fn record_answer(&mut self, response: &AssembledResponse) {
        let mut details = vec![
            ("query".to_string(), response.query.clone()),
            (
                "category".to_string(),
                response.medical_response.category.to_string(),
            ),
        ];
        if let Some(cbt) = &response.cbt_response {
            details.push(("exercise".to_string(), cbt.id.clone()));
        }
        if let Some(shifa) = &response.shifa_response {
            details.push(("dua".to_string(), shifa.prayer.id.clone()));
        }
        self.record(ActivityKind::MedicalQuery, details);
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> BTreeMap<ActivityKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.activity).or_insert(0) += 1;
        }
        counts
    }

    /// Human-readable listing of entries and per-activity counts.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No activities recorded in this session yet.".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "Session summary ({} activities)", self.len());
        for (i, entry) in self.entries.iter().enumerate() {
            let fields = entry
                .details
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "{}. [{}] {} {}",
                i + 1,
                entry.timestamp.format("%H:%M:%S"),
                entry.activity,
                fields
            );
        }
        let _ = writeln!(out, "Activity counts:");
        for (activity, count) in self.counts() {
            let _ = writeln!(out, "  {}: {}", activity, count);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let log = SessionLog::new();
        assert!(log.is_empty());
        assert!(log.summary().contains("No activities"));
    }

    #[test]
    fn test_record_keeps_order_and_counts() {
        let mut log = SessionLog::new();
        log.record(ActivityKind::CbtExercise, [("exercise", "breathing")]);
        log.record(ActivityKind::ComplianceCheck, [("item", "pork")]);
        log.record(ActivityKind::CbtExercise, [("exercise", "grounding")]);

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].detail("exercise"), Some("breathing"));
        assert_eq!(log.entries()[2].detail("exercise"), Some("grounding"));
        assert_eq!(log.entries()[1].detail("missing"), None);

        let counts = log.counts();
        assert_eq!(counts[&ActivityKind::CbtExercise], 2);
        assert_eq!(counts[&ActivityKind::ComplianceCheck], 1);
        assert!(!counts.contains_key(&ActivityKind::MedicalQuery));
    }

    #[test]
    fn test_summary_lists_entries_and_counts() {
        let mut log = SessionLog::new();
        log.record(ActivityKind::HealingPrayer, [("dua", "general_healing")]);
        log.record(ActivityKind::KnowledgeSearch, [("query", "sleep"), ("results", "2")]);

        let summary = log.summary();
        assert!(summary.contains("Session summary (2 activities)"));
        assert!(summary.contains("healing_prayer dua=general_healing"));
        assert!(summary.contains("knowledge_search query=sleep, results=2"));
        assert!(summary.contains("  healing_prayer: 1"));
    }
}
