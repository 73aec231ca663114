//! HTTP server for figrecd

use crate::routes;
use anyhow::Result;
use axum::http::Method;
use axum::Router;
use figrec_common::{Catalog, Recommender};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers. The catalog is loaded once and
/// read-only afterwards, so no locking is needed.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Recommender,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, recommender: Recommender) -> Self {
        Self {
            catalog,
            recommender,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router. Split out from [`run`] so tests can drive it.
pub fn app(state: Arc<AppState>) -> Router {
    // Browser frontends call this API cross-origin; keep CORS open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(routes::recommend_routes())
        .merge(routes::module_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the HTTP server
pub async fn run(state: AppState, port: u16) -> Result<()> {
    let app = app(Arc::new(state));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
