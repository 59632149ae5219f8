//! HTTP API for the health companion

pub mod routes;

use crate::assembler::ResponseAssembler;
use crate::config::Settings;
use crate::engines::KnowledgeBase;
use crate::error::AppError;
use crate::llm::LlmClient;
use crate::models::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const GENERIC_FAILURE: &str = "Unable to process your request. Please try again later.";

/// Application state shared across handlers
pub struct AppState<L: LlmClient> {
    pub settings: Settings,
    pub assembler: ResponseAssembler<L>,
    pub knowledge: KnowledgeBase,
    pub start_time: Instant,
}

impl<L: LlmClient> AppState<L> {
    pub fn new(settings: Settings, assembler: ResponseAssembler<L>, knowledge: KnowledgeBase) -> Self {
        Self {
            settings,
            assembler,
            knowledge,
            start_time: Instant::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            other => {
                error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };
        (status, Json(ApiResponse::<()>::err(message))).into_response()
    }
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::err("Endpoint not found")),
    )
}

/// Full router with every route, the 404 fallback and the HTTP layers.
pub fn router<L: LlmClient>(state: Arc<AppState<L>>) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::ask_routes())
        .merge(routes::cbt_routes())
        .merge(routes::shifa_routes())
        .merge(routes::knowledge_routes())
        .merge(routes::admin_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run<L: LlmClient>(state: AppState<L>) -> Result<(), AppError> {
    let addr = state.settings.bind_address();
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Shifa API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
