//! API routes for figrecd

use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use figrec_common::{
    ErrorResponse, HealthResponse, LlmError, ModulesResponse, RecommendError, RecommendRequest,
    RecommendResponse,
};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

fn error_body(status: StatusCode, kind: &str, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            kind: kind.to_string(),
        }),
    )
}

// ============================================================================
// Recommendation Routes
// ============================================================================

pub fn recommend_routes() -> Router<AppStateArc> {
    Router::new().route("/recommend", post(recommend))
}

async fn recommend(
    State(state): State<AppStateArc>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.query.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "bad_request",
            "query must not be empty".to_string(),
        ));
    }

    info!("  Recommending for query: {}", req.query);

    match state.recommender.recommend(&req.query).await {
        Ok(result) => Ok(Json(RecommendResponse {
            query: req.query,
            recommendations: result.recommendations,
            explanation: result.explanation,
        })),
        Err(e) => {
            error!("  Recommendation failed: {}", e);
            let (status, kind) = match &e {
                RecommendError::Llm(LlmError::Timeout(_)) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
                RecommendError::Llm(_) => (StatusCode::BAD_GATEWAY, "upstream"),
                RecommendError::Parse(_) => (StatusCode::BAD_GATEWAY, "parse"),
            };
            Err(error_body(status, kind, e.to_string()))
        }
    }
}

// ============================================================================
// Module Routes
// ============================================================================

pub fn module_routes() -> Router<AppStateArc> {
    Router::new().route("/modules", get(list_modules))
}

async fn list_modules(State(state): State<AppStateArc>) -> Json<ModulesResponse> {
    let modules = state.catalog.modules().to_vec();
    Json(ModulesResponse {
        total: modules.len(),
        modules,
    })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        modules_loaded: state.catalog.len(),
    })
}
