//! Plain-text rendering of engine results for the terminal.

use crate::assembler::MedicalResponse;
use crate::content::ComplianceVerdict;
use crate::engines::{ExerciseRecommendation, FaqHit, PrayerGuidance, RemedyGuidance};
use std::fmt::Write;

const RULE: &str = "----------------------------------------";
const ANSWER_PREVIEW: usize = 200;

fn numbered<S: AsRef<str>>(out: &mut String, items: &[S]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "   {}. {}", i + 1, item.as_ref());
    }
}

fn bulleted<S: AsRef<str>>(out: &mut String, items: &[S]) {
    for item in items {
        let _ = writeln!(out, "   - {}", item.as_ref());
    }
}

pub fn medical(answer: &MedicalResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MEDICAL RESPONSE\n{}", RULE);
    let _ = writeln!(out, "{}", answer.response);
    let _ = writeln!(out, "\nCategory: {}", answer.category);
    let _ = writeln!(out, "Keywords: {}", answer.keywords.join(", "));
    let _ = writeln!(out, "Confidence: {:?}", answer.confidence);
    if !answer.follow_up_questions.is_empty() {
        let _ = writeln!(out, "\nFollow-up questions:");
        numbered(&mut out, answer.follow_up_questions.as_slice());
    }
    let _ = writeln!(out, "\n{}", answer.disclaimer);
    out
}

pub fn exercise(rec: &ExerciseRecommendation) -> String {
    let mut out = String::new();
    let ex = &rec.exercise;
    let _ = writeln!(out, "RECOMMENDED EXERCISE\n{}", RULE);
    let _ = writeln!(out, "Exercise: {}", ex.name);
    let _ = writeln!(out, "Description: {}", ex.description);
    let _ = writeln!(out, "Duration: {}", ex.duration);
    let _ = writeln!(out, "Best for: {}", ex.best_for.join(", "));
    let _ = writeln!(out, "Match score: {}", rec.match_score);
    let _ = writeln!(out, "\nEncouragement:\n   {}", rec.encouragement);
    let _ = writeln!(out, "\nSteps:");
    numbered(&mut out, ex.steps);
    out
}

pub fn prayer(guidance: &PrayerGuidance) -> String {
    let mut out = String::new();
    let dua = &guidance.prayer;
    let _ = writeln!(out, "HEALING DU'A\n{}", RULE);
    let _ = writeln!(out, "Arabic: {}", dua.arabic);
    let _ = writeln!(out, "\nTransliteration:\n   {}", dua.transliteration);
    let _ = writeln!(out, "\nTranslation:\n   {}", dua.translation);
    let _ = writeln!(out, "\nSource: {}", dua.source);
    let _ = writeln!(out, "How to recite: {}", dua.recitation_notes);
    let _ = writeln!(out, "\nEncouragement:\n   {}", guidance.encouragement);
    if !guidance.additional_guidance.is_empty() {
        let _ = writeln!(out, "\nAdditional guidance:");
        bulleted(&mut out, guidance.additional_guidance.as_slice());
    }
    out
}

pub fn remedy(guidance: &RemedyGuidance) -> String {
    let mut out = String::new();
    let remedy = &guidance.remedy;
    let _ = writeln!(out, "RECOMMENDED REMEDY\n{}", RULE);
    let _ = writeln!(out, "Remedy: {} ({})", remedy.name, remedy.arabic_name);
    let _ = writeln!(out, "Description: {}", remedy.description);
    let _ = writeln!(out, "\nReference:\n   {}", remedy.citation);
    let _ = writeln!(out, "\nUsage: {}", remedy.usage);
    let _ = writeln!(out, "Halal status: {}", remedy.compliance.label());
    let _ = writeln!(out, "\nBenefits:");
    bulleted(&mut out, remedy.benefits);
    if !remedy.precautions.is_empty() {
        let _ = writeln!(out, "\nPrecautions: {}", remedy.precautions);
    }
    let _ = writeln!(out, "\nIslamic guidance:\n   {}", guidance.islamic_guidance);
    out
}

pub fn verdict(item: &str, verdict: &ComplianceVerdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "HALAL VERIFICATION RESULT\n{}", RULE);
    let _ = writeln!(out, "Item: {}", item);
    let _ = writeln!(out, "Status: {}", verdict.label);
    let _ = writeln!(out, "Reason: {}", verdict.reason);
    if let Some(alternative) = verdict.alternative {
        let _ = writeln!(out, "Alternative: {}", alternative);
    }
    let _ = writeln!(out, "\nGuidance:\n   {}", verdict.guidance);
    if let Some(principle) = verdict.principle {
        let _ = writeln!(out, "\nPrinciple:\n   {}", principle);
    }
    out
}

pub fn faq_hits(query: &str, hits: &[FaqHit]) -> String {
    let mut out = String::new();
    if hits.is_empty() {
        let _ = writeln!(out, "No results found for '{}'.", query);
        return out;
    }
    let _ = writeln!(out, "Found {} results for '{}':", hits.len(), query);
    for (i, hit) in hits.iter().enumerate() {
        let faq = &hit.record;
        let _ = writeln!(out, "\n{}. Question: {}", i + 1, faq.question);
        let _ = writeln!(out, "   Answer: {}", truncate(&faq.answer, ANSWER_PREVIEW));
        let _ = writeln!(out, "   Source: {}", faq.source);
        let _ = writeln!(out, "   Category: {}", faq.category);
    }
    out
}

/// First `max` characters of `text`.
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::verify_compliance;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 200), "hi");
    }

    #[test]
    fn test_verdict_shows_alternative() {
        let text = verdict("gelatin", &verify_compliance("gelatin"));
        assert!(text.contains("Status: Haram"));
        assert!(text.contains("Alternative:"));
    }

    #[test]
    fn test_empty_hits() {
        assert!(faq_hits("zzz", &[]).contains("No results found for 'zzz'"));
    }
}
