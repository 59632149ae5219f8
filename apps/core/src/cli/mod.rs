//! Interactive demo shell.
//!
//! Reads menu choices and answers from any `BufRead` and writes to any
//! `Write`, so the whole loop can be driven from a test with in-memory buffers.

pub mod render;

use crate::assembler::{AnswerSource, AskRequest, ResponseAssembler};
use crate::content::verify_compliance;
use crate::engines::knowledge::DEFAULT_SEARCH_LIMIT;
use crate::engines::{CbtEngine, KnowledgeBase, ShifaEngine};
use crate::error::AppError;
use crate::llm::LlmClient;
use crate::session::{ActivityKind, SessionLog};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::io::{BufRead, Write};
use tracing::debug;

const BANNER: &str = "======================================================================
WELCOME TO SHIFA AI - YOUR AI HEALTH COMPANION
======================================================================
  Medical Q&A
  CBT Coaching & Exercises
  Islamic Healing (Du'as & Prophetic Medicine)
  Medical Knowledge Base
======================================================================";

const MENU: &str = "
MAIN MENU - Choose an option:
1. Ask Medical Question
2. Get CBT Exercise Recommendation
3. Get Healing Du'a
4. Check Prophetic Medicine
5. Verify Halal Compliance
6. Browse Medical Knowledge Base
7. Get Daily Tips
8. View Session Summary
9. Exit
--------------------------------------------------";

const GENERAL_TIPS: &[&str] = &[
    "Stay hydrated - drink at least 8 glasses of water daily",
    "Take breaks from screen time every 20 minutes",
    "Practice gratitude by noting 3 things you're thankful for",
    "Get at least 7-8 hours of quality sleep each night",
    "Take a 10-minute walk after meals to aid digestion",
];

/// Menu shortcuts for the du'a prompt
const PRAYER_CATEGORIES: &[(&str, &str)] = &[
    ("1", "general"),
    ("2", "mental_health"),
    ("3", "pain_management"),
    ("4", "acute_illness"),
    ("5", "protection"),
];

/// Characters of the last model answer kept as context for the next question
const CONTEXT_CHARS: usize = 200;

pub struct DemoShell<L: LlmClient, I: BufRead, O: Write> {
    assembler: ResponseAssembler<L>,
    knowledge: KnowledgeBase,
    session: SessionLog,
    last_answer: Option<String>,
    rng: StdRng,
    input: I,
    output: O,
}

impl<L: LlmClient, I: BufRead, O: Write> DemoShell<L, I, O> {
    pub fn new(
        assembler: ResponseAssembler<L>,
        knowledge: KnowledgeBase,
        rng: StdRng,
        input: I,
        output: O,
    ) -> Self {
        Self {
            assembler,
            knowledge,
            session: SessionLog::new(),
            last_answer: None,
            rng,
            input,
            output,
        }
    }

    pub fn session(&self) -> &SessionLog {
        &self.session
    }

    #[cfg(test)]
    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    #[cfg(test)]
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Runs the menu loop until the user exits or input ends.
    pub async fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{}", BANNER)?;
        if !self.assembler.model_configured() {
            writeln!(
                self.output,
                "Note: no API key configured, medical answers will use the fallback text."
            )?;
        }

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice (1-9): ")? else {
                break;
            };
            debug!(choice = %choice, "Menu choice");

            match choice.as_str() {
                "1" => self.ask().await?,
                "2" => self.cbt_exercise()?,
                "3" => self.healing_prayer()?,
                "4" => self.prophetic_remedy()?,
                "5" => self.compliance_check()?,
                "6" => self.knowledge_search()?,
                "7" => self.daily_tips()?,
                "8" => {
                    let summary = self.session.summary();
                    writeln!(self.output, "\n{}", summary)?;
                }
                "9" => {
                    writeln!(
                        self.output,
                        "\nThank you for using Shifa AI. May Allah grant you complete healing."
                    )?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Please select 1-9.")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Writes a label and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `prompt`, but an empty answer prints `rejection` and yields `None`.
    fn required(&mut self, label: &str, rejection: &str) -> Result<Option<String>, AppError> {
        match self.prompt(label)? {
            Some(answer) if !answer.is_empty() => Ok(Some(answer)),
            Some(_) => {
                writeln!(self.output, "{}", rejection)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn confirm(&mut self, label: &str) -> Result<bool, AppError> {
        Ok(self
            .prompt(label)?
            .is_some_and(|a| a.to_lowercase().starts_with('y')))
    }

    async fn ask(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\nMEDICAL Q&A SESSION")?;
        let Some(question) =
            self.required("Enter your health question: ", "Please enter a valid question.")?
        else {
            return Ok(());
        };
        let include_cbt = self.confirm("Include CBT coaching? (y/n): ")?;
        let include_shifa = self.confirm("Include Islamic healing? (y/n): ")?;

        let request = AskRequest {
            include_cbt,
            include_shifa,
            previous_response: self.last_answer.clone(),
            ..AskRequest::new(question)
        };

        writeln!(self.output, "\nProcessing your question...")?;
        let response = match self.assembler.assemble(&request, &mut self.rng).await {
            Ok(response) => response,
            Err(AppError::InvalidInput(msg)) => {
                writeln!(self.output, "Invalid input: {}", msg)?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        writeln!(self.output, "\n{}", render::medical(&response.medical_response))?;
        if let Some(cbt) = &response.cbt_response {
            writeln!(self.output, "{}", render::exercise(cbt))?;
        }
        if let Some(shifa) = &response.shifa_response {
            writeln!(self.output, "{}", shifa.formatted)?;
        }
        writeln!(self.output, "{}", response.personalization)?;

        if response.medical_response.source == AnswerSource::Model {
            self.last_answer = Some(render::truncate(
                &response.medical_response.response,
                CONTEXT_CHARS,
            ));
        }
        self.session.record_answer(&response);
        Ok(())
    }

    fn cbt_exercise(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\nCBT EXERCISE RECOMMENDATION")?;
        let Some(symptoms) = self.required(
            "Enter your symptoms/concerns (comma-separated): ",
            "Please enter at least one symptom.",
        )?
        else {
            return Ok(());
        };
        let symptoms: Vec<String> = symptoms
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mood = self
            .prompt("Rate your mood (1-5, optional): ")?
            .and_then(|m| m.parse::<u8>().ok())
            .map(|m| m.clamp(1, 5));

        let rec = self
            .assembler
            .cbt()
            .recommend_exercise(&symptoms, mood, &mut self.rng);
        writeln!(self.output, "\n{}", render::exercise(&rec))?;
        writeln!(
            self.output,
            "Daily CBT Tip:\n   {}",
            CbtEngine::daily_tip(&mut self.rng)
        )?;

        self.session.record(
            ActivityKind::CbtExercise,
            [
                ("symptoms", symptoms.join(", ")),
                ("exercise", rec.id.clone()),
                ("score", rec.match_score.to_string()),
            ],
        );
        Ok(())
    }

    fn healing_prayer(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\nHEALING DU'A")?;
        writeln!(
            self.output,
            "Available categories:\n   1. General healing\n   2. Mental health/anxiety\n   3. Pain relief\n   4. Fever/illness\n   5. Protection"
        )?;
        let Some(answer) = self.required(
            "Select category (1-5) or enter specific condition: ",
            "Please choose a category or enter a condition.",
        )?
        else {
            return Ok(());
        };

        let category = PRAYER_CATEGORIES
            .iter()
            .find(|(key, _)| *key == answer)
            .map(|(_, category)| *category);
        let condition = category.is_none().then_some(answer.as_str());

        let guidance = self
            .assembler
            .shifa()
            .healing_prayer(category, condition, &mut self.rng);
        writeln!(self.output, "\n{}", render::prayer(&guidance))?;

        self.session.record(
            ActivityKind::HealingPrayer,
            [("request", answer.clone()), ("dua", guidance.id.clone())],
        );
        Ok(())
    }

    fn prophetic_remedy(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\nPROPHETIC MEDICINE")?;
        let Some(condition) = self.required(
            "Enter your condition or health concern: ",
            "Please enter a valid condition.",
        )?
        else {
            return Ok(());
        };

        let guidance = self.assembler.shifa().prophetic_remedy(&condition);
        writeln!(self.output, "\n{}", render::remedy(&guidance))?;

        self.session.record(
            ActivityKind::PropheticRemedy,
            [("condition", condition), ("remedy", guidance.id.clone())],
        );
        Ok(())
    }

    fn compliance_check(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\nHALAL COMPLIANCE VERIFICATION")?;
        let Some(item) = self.required(
            "Enter ingredient/treatment to verify: ",
            "Please enter a valid ingredient or treatment.",
        )?
        else {
            return Ok(());
        };

        let verdict = verify_compliance(&item);
        writeln!(self.output, "\n{}", render::verdict(&item, &verdict))?;

        self.session.record(
            ActivityKind::ComplianceCheck,
            [("item", item), ("status", verdict.label.to_string())],
        );
        Ok(())
    }

    fn knowledge_search(&mut self) -> Result<(), AppError> {
        writeln!(
            self.output,
            "\nMEDICAL KNOWLEDGE BASE ({} FAQs)",
            self.knowledge.len()
        )?;
        let Some(query) =
            self.required("Enter search term: ", "Please enter a search term.")?
        else {
            return Ok(());
        };

        let hits = self.knowledge.search(&query, None, DEFAULT_SEARCH_LIMIT);
        writeln!(self.output, "\n{}", render::faq_hits(&query, &hits))?;

        self.session.record(
            ActivityKind::KnowledgeSearch,
            [("query", query), ("results", hits.len().to_string())],
        );
        Ok(())
    }

    fn daily_tips(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\nDAILY HEALTH & WELLNESS TIPS")?;
        writeln!(
            self.output,
            "CBT Wisdom:\n   {}",
            CbtEngine::daily_tip(&mut self.rng)
        )?;
        writeln!(
            self.output,
            "\nIslamic Health Wisdom:\n   {}",
            ShifaEngine::daily_tip(&mut self.rng)
        )?;
        if let Some(tip) = GENERAL_TIPS.choose(&mut self.rng) {
            writeln!(self.output, "\nGeneral Health Tip:\n   {}", tip)?;
        }

        self.session
            .record(ActivityKind::DailyTips, Vec::<(String, String)>::new());
        Ok(())
    }
}
