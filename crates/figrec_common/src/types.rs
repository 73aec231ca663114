//! Shared request/response types for the figrecd API.

use crate::catalog::Module;
use serde::{Deserialize, Serialize};

/// One recommended module: catalog fields merged with the model's score and
/// rationale. The score is whatever the model produced - nominally in [0,1]
/// but tolerated out of range or missing (defaults to 0.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecommendation {
    pub module: String,
    pub description: String,
    pub use_case: String,
    pub chart_type: String,
    pub score: f64,
    pub reason: String,
}

/// Inbound recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
}

/// Outbound recommendation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub query: String,
    pub recommendations: Vec<ModuleRecommendation>,
    pub explanation: String,
}

/// Response for the module-listing endpoint. Carries eligible modules only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesResponse {
    pub total: usize,
    pub modules: Vec<Module>,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub modules_loaded: usize,
}

/// Structured error body. `kind` lets callers tell "model unreachable"
/// (`upstream`, `timeout`) apart from "model replied nonsense" (`parse`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
