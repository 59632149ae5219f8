//! API routes
//!
//! Every handler answers with the [`ApiResponse`] envelope. Bad input is a
//! 400; anything else that fails is logged and reported as a generic 500.

use crate::assembler::{AskRequest, AssembledResponse};
use crate::brain::category::CategoryLabel;
use crate::content::{verify_compliance, ComplianceVerdict, ExerciseType, LibrarySizes};
use crate::engines::knowledge::DEFAULT_SEARCH_LIMIT;
use crate::engines::{
    CbtEngine, ExerciseRecommendation, FaqHit, KnowledgeStats, PrayerGuidance, RemedyGuidance,
    ShifaEngine, ShifaGuidance, ThoughtAnalysis,
};
use crate::error::AppError;
use crate::llm::LlmClient;
use crate::models::{
    ApiResponse, CbtRequest, ComplianceRequest, DuaQuery, ExerciseQuery, HealthQuery,
    RemedyQuery, SearchQuery, ShifaRequest, ThoughtRequest,
};
use crate::server::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

type AppStateArc<L> = Arc<AppState<L>>;
type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

const MAX_SEARCH_LIMIT: usize = 50;
const DEFAULT_CBT_SYMPTOM: &str = "stress";

/// Unwraps a JSON body and runs its validation rules.
fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(body) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    body.validate()?;
    Ok(body)
}

/// Unwraps query-string parameters, keeping extraction failures in the envelope.
fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    let Query(params) = params.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    Ok(params)
}

fn parse_category(value: Option<&str>) -> Result<Option<CategoryLabel>, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(CategoryLabel::from_str)
        .transpose()
        .map_err(AppError::InvalidInput)
}

// ============================================================================
// Health
// ============================================================================

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    model_configured: bool,
    tables: LibrarySizes,
    faqs: usize,
    uptime_seconds: u64,
}

pub fn health_routes<L: LlmClient>() -> Router<AppStateArc<L>> {
    Router::new().route("/health", get(health::<L>))
}

async fn health<L: LlmClient>(State(state): State<AppStateArc<L>>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status: "healthy",
        service: "Shifa AI",
        version: env!("CARGO_PKG_VERSION"),
        model_configured: state.assembler.model_configured(),
        tables: state.assembler.library().sizes(),
        faqs: state.knowledge.len(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

// ============================================================================
// Ask
// ============================================================================

#[derive(Serialize)]
struct RequestMetadata {
    include_cbt: bool,
    include_shifa: bool,
    user_id: Option<String>,
    processed_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct AskResponse {
    #[serde(flatten)]
    result: AssembledResponse,
    request_metadata: RequestMetadata,
}

pub fn ask_routes<L: LlmClient>() -> Router<AppStateArc<L>> {
    Router::new().route("/ask", post(ask::<L>))
}

async fn ask<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    payload: Result<Json<HealthQuery>, JsonRejection>,
) -> ApiResult<AskResponse> {
    let query = validated(payload)?;
    let request = AskRequest {
        include_cbt: query.include_cbt,
        include_shifa: query.include_shifa,
        mood: query.mood_level,
        ..AskRequest::new(query.question)
    };

    let mut rng = StdRng::from_entropy();
    let result = state.assembler.assemble(&request, &mut rng).await?;

    Ok(Json(ApiResponse::ok(AskResponse {
        result,
        request_metadata: RequestMetadata {
            include_cbt: request.include_cbt,
            include_shifa: request.include_shifa,
            user_id: query.user_id,
            processed_at: Utc::now(),
        },
    })))
}

// ============================================================================
// CBT
// ============================================================================

#[derive(Serialize)]
struct DailyTip {
    tip: &'static str,
    category: &'static str,
}

pub fn cbt_routes<L: LlmClient>() -> Router<AppStateArc<L>> {
    Router::new()
        .route("/cbt/recommendation", post(cbt_recommendation::<L>))
        .route("/cbt/exercise", get(cbt_exercise::<L>))
        .route("/cbt/daily-tip", get(cbt_daily_tip))
        .route("/cbt/distortions", post(cbt_distortions))
}

async fn cbt_recommendation<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    payload: Result<Json<CbtRequest>, JsonRejection>,
) -> ApiResult<ExerciseRecommendation> {
    let request = validated(payload)?;
    let query = state.assembler.check_input(&request.query)?;

    let mut symptoms = state.assembler.keywords(&query);
    if symptoms.is_empty() {
        symptoms.push(DEFAULT_CBT_SYMPTOM.to_string());
    }

    let recommendation =
        state
            .assembler
            .cbt()
            .recommend_exercise(&symptoms, request.mood_level, &mut rand::thread_rng());
    Ok(Json(ApiResponse::ok(recommendation)))
}

async fn cbt_exercise<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    params: Result<Query<ExerciseQuery>, QueryRejection>,
) -> ApiResult<ExerciseRecommendation> {
    let params = query_params(params)?;
    let cbt = state.assembler.cbt();
    let mut rng = rand::thread_rng();

    let requested = params
        .exercise_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(ExerciseType::from_str)
        .transpose()
        .map_err(AppError::InvalidInput)?;

    let exercise = match requested {
        Some(kind) => cbt
            .exercise_of_type(kind, &mut rng)
            .unwrap_or_else(|| cbt.random_exercise(&mut rng)),
        None => cbt.random_exercise(&mut rng),
    };
    Ok(Json(ApiResponse::ok(exercise)))
}

async fn cbt_daily_tip() -> Json<ApiResponse<DailyTip>> {
    Json(ApiResponse::ok(DailyTip {
        tip: CbtEngine::daily_tip(&mut rand::thread_rng()),
        category: "CBT",
    }))
}

async fn cbt_distortions(
    payload: Result<Json<ThoughtRequest>, JsonRejection>,
) -> ApiResult<ThoughtAnalysis> {
    let request = validated(payload)?;
    Ok(Json(ApiResponse::ok(CbtEngine::analyze_thought(
        &request.thought,
    ))))
}

// ============================================================================
// Shifa
// ============================================================================

pub fn shifa_routes<L: LlmClient>() -> Router<AppStateArc<L>> {
    Router::new()
        .route("/shifa/guidance", post(shifa_guidance::<L>))
        .route("/shifa/dua", get(shifa_dua::<L>))
        .route("/shifa/prophetic-medicine", get(shifa_remedy::<L>))
        .route("/shifa/compliance", post(shifa_compliance))
        .route("/shifa/daily-tip", get(shifa_daily_tip))
}

async fn shifa_guidance<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    payload: Result<Json<ShifaRequest>, JsonRejection>,
) -> ApiResult<ShifaGuidance> {
    let request = validated(payload)?;
    let query = state.assembler.check_input(&request.query)?;

    let category = match parse_category(request.category.as_deref())? {
        Some(category) => category,
        None => state.assembler.classify(&query),
    };
    let keywords = state.assembler.keywords(&query);
    info!(category = %category, "Building Shifa guidance");

    let guidance = state.assembler.shifa().comprehensive_guidance(
        &query,
        category,
        keywords.first().map(String::as_str),
        &mut rand::thread_rng(),
    );
    Ok(Json(ApiResponse::ok(guidance)))
}

async fn shifa_dua<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    params: Result<Query<DuaQuery>, QueryRejection>,
) -> ApiResult<PrayerGuidance> {
    let params = query_params(params)?;
    let prayer = state.assembler.shifa().healing_prayer(
        params.category.as_deref(),
        params.condition.as_deref(),
        &mut rand::thread_rng(),
    );
    Ok(Json(ApiResponse::ok(prayer)))
}

async fn shifa_remedy<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    params: Result<Query<RemedyQuery>, QueryRejection>,
) -> ApiResult<RemedyGuidance> {
    let params = query_params(params)?;
    let remedy = state
        .assembler
        .shifa()
        .prophetic_remedy(params.condition.as_deref().unwrap_or_default());
    Ok(Json(ApiResponse::ok(remedy)))
}

async fn shifa_compliance(
    payload: Result<Json<ComplianceRequest>, JsonRejection>,
) -> ApiResult<ComplianceVerdict> {
    let request = validated(payload)?;
    Ok(Json(ApiResponse::ok(verify_compliance(&request.item))))
}

async fn shifa_daily_tip() -> Json<ApiResponse<DailyTip>> {
    Json(ApiResponse::ok(DailyTip {
        tip: ShifaEngine::daily_tip(&mut rand::thread_rng()),
        category: "Islamic Health",
    }))
}

// ============================================================================
// Knowledge
// ============================================================================

#[derive(Serialize)]
struct SearchResults {
    query: String,
    category: Option<String>,
    total: usize,
    results: Vec<FaqHit>,
}

#[derive(Serialize)]
struct CategoryListing {
    categories: Vec<String>,
    stats: KnowledgeStats,
}

pub fn knowledge_routes<L: LlmClient>() -> Router<AppStateArc<L>> {
    Router::new()
        .route("/knowledge/search", get(knowledge_search::<L>))
        .route("/knowledge/categories", get(knowledge_categories::<L>))
}

async fn knowledge_search<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<SearchResults> {
    let params = query_params(params)?;
    let query = state.assembler.check_input(&params.q)?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let results = state
        .knowledge
        .search(&query, params.category.as_deref(), limit);
    Ok(Json(ApiResponse::ok(SearchResults {
        total: results.len(),
        query,
        category: params.category,
        results,
    })))
}

async fn knowledge_categories<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
) -> Json<ApiResponse<CategoryListing>> {
    Json(ApiResponse::ok(CategoryListing {
        categories: state.knowledge.categories(),
        stats: state.knowledge.stats(),
    }))
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Serialize)]
struct AdminStats {
    tables: LibrarySizes,
    knowledge: KnowledgeStats,
    model: String,
    model_configured: bool,
    uptime_seconds: u64,
}

pub fn admin_routes<L: LlmClient>() -> Router<AppStateArc<L>> {
    Router::new().route("/admin/stats", get(admin_stats::<L>))
}

async fn admin_stats<L: LlmClient>(
    State(state): State<AppStateArc<L>>,
) -> Json<ApiResponse<AdminStats>> {
    Json(ApiResponse::ok(AdminStats {
        tables: state.assembler.library().sizes(),
        knowledge: state.knowledge.stats(),
        model: state.settings.openai_model.clone(),
        model_configured: state.assembler.model_configured(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
