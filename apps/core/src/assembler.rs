//! Response assembly: classification, model answer and table selections.
//!
//! One question in, one [`AssembledResponse`] out. The model call is the only
//! await point; its failure is converted to a fixed fallback answer.

use crate::brain::category::{CategoryClassifier, CategoryLabel};
use crate::brain::keywords::{clean_text, validate_input, KeywordExtractor};
use crate::brain::prompts::{follow_up_questions, recommended_sources, system_prompt, FALLBACK_ANSWER, MEDICAL_DISCLAIMER};
use crate::config::DEFAULT_MAX_INPUT_LENGTH;
use crate::content::ContentLibrary;
use crate::engines::cbt::{encouragement_pool, CbtEngine, ExerciseRecommendation, DEFAULT_ENCOURAGEMENT};
use crate::engines::shifa::{ShifaEngine, ShifaGuidance};
use crate::error::AppError;
use crate::llm::{ChatMessage, LlmClient, SamplingParams};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Where the answer text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicalResponse {
    pub response: String,
    pub category: CategoryLabel,
    pub keywords: Vec<String>,
    pub follow_up_questions: Vec<&'static str>,
    pub confidence: Confidence,
    pub sources_recommended: Vec<&'static str>,
    pub source: AnswerSource,
    pub disclaimer: &'static str,
}

/// A question plus the optional extras the caller asked for.
#[derive(Debug, Clone, Default)]
pub struct AskRequest {
    pub question: String,
    pub include_cbt: bool,
    pub include_shifa: bool,
    /// 1 (very low) to 5 (excellent)
    pub mood: Option<u8>,
    /// Last answer in this conversation, passed to the model as context
    pub previous_response: Option<String>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssembledResponse {
    pub query: String,
    pub medical_response: MedicalResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cbt_response: Option<ExerciseRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifa_response: Option<ShifaGuidance>,
    pub personalization: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ResponseAssembler<L: LlmClient> {
    llm: Arc<L>,
    library: Arc<ContentLibrary>,
    classifier: CategoryClassifier,
    extractor: KeywordExtractor,
    cbt: CbtEngine,
    shifa: ShifaEngine,
    max_input_length: usize,
}

impl<L: LlmClient> ResponseAssembler<L> {
    pub fn new(llm: Arc<L>, library: Arc<ContentLibrary>) -> Self {
        Self {
            cbt: CbtEngine::new(Arc::clone(&library)),
            shifa: ShifaEngine::new(Arc::clone(&library)),
            classifier: CategoryClassifier::new(),
            extractor: KeywordExtractor::new(),
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            llm,
            library,
        }
    }

    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    pub fn cbt(&self) -> &CbtEngine {
        &self.cbt
    }

    pub fn shifa(&self) -> &ShifaEngine {
        &self.shifa
    }

    pub fn model_configured(&self) -> bool {
        self.llm.is_configured()
    }

    pub fn classify(&self, text: &str) -> CategoryLabel {
        self.classifier.classify(text)
    }

    pub fn keywords(&self, text: &str) -> Vec<String> {
        self.extractor.extract(text)
    }

    /// Rejects blank or oversized text and returns the cleaned form.
    pub fn check_input(&self, text: &str) -> Result<String, AppError> {
        if !validate_input(text, self.max_input_length) {
            return Err(AppError::InvalidInput(format!(
                "Text must be non-empty and at most {} characters",
                self.max_input_length
            )));
        }
        Ok(clean_text(text))
    }

    /// Model answer for a question, or the fallback text when the model is
    /// unavailable. The classified category is kept either way.
    #[instrument(skip(self, previous_response))]
    pub async fn medical_answer(
        &self,
        question: &str,
        previous_response: Option<&str>,
    ) -> MedicalResponse {
        let category = self.classify(question);
        let keywords = self.keywords(question);

        let mut messages = vec![ChatMessage::system(system_prompt(category))];
        if let Some(previous) = previous_response.filter(|p| !p.trim().is_empty()) {
            messages.push(ChatMessage::assistant(format!(
                "Previous conversation context: {}",
                previous
            )));
        }
        messages.push(ChatMessage::user(question));

        let answer = if self.llm.is_configured() {
            match self.llm.complete(messages, SamplingParams::default()).await {
                Ok(text) => Ok(text),
                Err(e) => {
                    error!("Error generating medical response: {}", e);
                    Err(e)
                }
            }
        } else {
            warn!("Chat-completion API not configured, using fallback answer");
            Err(AppError::ExternalApi("not configured".to_string()))
        };

        match answer {
            Ok(response) => MedicalResponse {
                response,
                category,
                keywords,
                follow_up_questions: follow_up_questions(category).to_vec(),
                confidence: Confidence::High,
                sources_recommended: recommended_sources(category).to_vec(),
                source: AnswerSource::Model,
                disclaimer: MEDICAL_DISCLAIMER,
            },
            Err(_) => MedicalResponse {
                response: FALLBACK_ANSWER.to_string(),
                category,
                keywords,
                follow_up_questions: Vec::new(),
                confidence: Confidence::Low,
                sources_recommended: Vec::new(),
                source: AnswerSource::Fallback,
                disclaimer: MEDICAL_DISCLAIMER,
            },
        }
    }

    /// Full response for a question, with CBT and Shifa sections on request.
    #[instrument(skip(self, request, rng), fields(cbt = request.include_cbt, shifa = request.include_shifa))]
    pub async fn assemble<R: Rng + Send + ?Sized>(
        &self,
        request: &AskRequest,
        rng: &mut R,
    ) -> Result<AssembledResponse, AppError> {
        let question = self.check_input(&request.question)?;
        if let Some(mood) = request.mood {
            if !(1..=5).contains(&mood) {
                return Err(AppError::InvalidInput(format!(
                    "Mood level must be between 1 and 5, got {}",
                    mood
                )));
            }
        }

        info!("Processing health query: {}", preview(&question, 50));

        let medical = self
            .medical_answer(&question, request.previous_response.as_deref())
            .await;

        let cbt_response = request
            .include_cbt
            .then(|| self.cbt.recommend_exercise(&medical.keywords, request.mood, rng));

        let shifa_response = request.include_shifa.then(|| {
            self.shifa.comprehensive_guidance(
                &question,
                medical.category,
                medical.keywords.first().map(String::as_str),
                rng,
            )
        });

        let personalization = match &cbt_response {
            Some(cbt) => cbt.encouragement.clone(),
            None => encouragement_pool(request.mood)
                .choose(rng)
                .copied()
                .unwrap_or(DEFAULT_ENCOURAGEMENT)
                .to_string(),
        };

        Ok(AssembledResponse {
            query: question,
            medical_response: medical,
            cbt_response,
            shifa_response,
            personalization,
            timestamp: Utc::now(),
        })
    }
}

/// First `max` characters, for log lines.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    // --- Mock Client ---

    struct MockLlmClient {
        response: Result<String, AppError>,
        configured: bool,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl MockLlmClient {
        fn new(response: Result<String, AppError>) -> Self {
            Self {
                response,
                configured: true,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(Ok("unused".to_string()))
            }
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(
            &self,
            messages: Vec<ChatMessage>,
            _params: SamplingParams,
        ) -> Result<String, AppError> {
            self.seen.lock().unwrap().push(messages);
            self.response.clone()
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn assembler(client: MockLlmClient) -> (ResponseAssembler<MockLlmClient>, Arc<MockLlmClient>) {
        let client = Arc::new(client);
        let library = Arc::new(ContentLibrary::load().unwrap());
        (ResponseAssembler::new(Arc::clone(&client), library), client)
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_model_answer_nominal() {
        // 1. Arrange
        let (assembler, client) = assembler(MockLlmClient::new(Ok("Try to rest.".to_string())));

        // 2. Act
        let medical = assembler
            .medical_answer("I'm feeling very anxious and stressed", None)
            .await;

        // 3. Assert
        assert_eq!(medical.response, "Try to rest.");
        assert_eq!(medical.category, CategoryLabel::MentalHealth);
        assert_eq!(medical.keywords, vec!["stress"]);
        assert_eq!(medical.confidence, Confidence::High);
        assert_eq!(medical.source, AnswerSource::Model);
        assert_eq!(medical.follow_up_questions.len(), 3);
        assert_eq!(medical.disclaimer, MEDICAL_DISCLAIMER);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].len(), 2);
        assert!(seen[0][0].content.contains("mental wellness"));
    }

    #[tokio::test]
    async fn test_model_failure_becomes_fallback() {
        let (assembler, _) = assembler(MockLlmClient::new(Err(AppError::ExternalApi(
            "quota exceeded".to_string(),
        ))));

        let medical = assembler.medical_answer("My back hurts", None).await;

        assert_eq!(medical.response, FALLBACK_ANSWER);
        assert_eq!(medical.category, CategoryLabel::PainManagement);
        assert_eq!(medical.confidence, Confidence::Low);
        assert_eq!(medical.source, AnswerSource::Fallback);
        assert!(medical.follow_up_questions.is_empty());
        assert!(medical.sources_recommended.is_empty());
        assert_eq!(medical.disclaimer, MEDICAL_DISCLAIMER);
    }

    #[tokio::test]
    async fn test_unconfigured_client_is_never_called() {
        let (assembler, client) = assembler(MockLlmClient::unconfigured());

        let medical = assembler.medical_answer("Is water healthy?", None).await;

        assert_eq!(medical.source, AnswerSource::Fallback);
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_previous_response_is_sent_as_context() {
        let (assembler, client) = assembler(MockLlmClient::new(Ok("ok".to_string())));

        assembler
            .medical_answer("And what about sleep?", Some("Drink more water."))
            .await;

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].len(), 3);
        assert_eq!(seen[0][1].role, crate::llm::messages::Role::Assistant);
        assert_eq!(
            seen[0][1].content,
            "Previous conversation context: Drink more water."
        );
        assert_eq!(seen[0][2].content, "And what about sleep?");
    }

    #[tokio::test]
    async fn test_assemble_with_cbt_and_shifa() {
        let (assembler, _) = assembler(MockLlmClient::new(Ok("Answer".to_string())));
        let request = AskRequest {
            include_cbt: true,
            include_shifa: true,
            mood: Some(2),
            ..AskRequest::new("I'm feeling very anxious and stressed")
        };

        let response = assembler
            .assemble(&request, &mut StdRng::seed_from_u64(17))
            .await
            .unwrap();

        let cbt = response.cbt_response.as_ref().unwrap();
        assert_eq!(cbt.id, "breathing");
        assert_eq!(response.personalization, cbt.encouragement);
        assert!(encouragement_pool(Some(2)).contains(&response.personalization.as_str()));

        let shifa = response.shifa_response.as_ref().unwrap();
        assert_eq!(shifa.category, CategoryLabel::MentalHealth);
        assert_eq!(shifa.prayer.id, "anxiety_relief");
    }

    #[tokio::test]
    async fn test_assemble_without_extras() {
        let (assembler, _) = assembler(MockLlmClient::new(Ok("Answer".to_string())));

        let response = assembler
            .assemble(&AskRequest::new("How much water should I drink?"), &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();

        assert!(response.cbt_response.is_none());
        assert!(response.shifa_response.is_none());
        assert_eq!(response.medical_response.category, CategoryLabel::GeneralHealth);
        assert!(encouragement_pool(None).contains(&response.personalization.as_str()));
    }

    #[tokio::test]
    async fn test_assemble_rejects_invalid_input() {
        let (assembler, client) = assembler(MockLlmClient::new(Ok("Answer".to_string())));
        let assembler = assembler.with_max_input_length(10);
        let mut rng = StdRng::seed_from_u64(0);

        let blank = assembler.assemble(&AskRequest::new("   "), &mut rng).await;
        assert!(matches!(blank, Err(AppError::InvalidInput(_))));

        let long = assembler
            .assemble(&AskRequest::new("this question is too long"), &mut rng)
            .await;
        assert!(matches!(long, Err(AppError::InvalidInput(_))));

        let bad_mood = AskRequest {
            mood: Some(9),
            ..AskRequest::new("headache")
        };
        assert!(matches!(
            assembler.assemble(&bad_mood, &mut rng).await,
            Err(AppError::InvalidInput(_))
        ));

        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
