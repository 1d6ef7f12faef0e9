//! Axum router configuration with middleware.
//!
//! Routes live under `/api/`. Middleware: CORS (any origin) and request
//! tracing.
//!
//! The chat widget's static files are served from the configured web
//! directory when it exists. API routes and `/health` take priority; unknown
//! paths fall through to the directory. If the directory does not exist,
//! only the API is served.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/sessions/{session_id}/history",
            get(handlers::session::get_history),
        );

    let web_dir = state.web_dir.clone();

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if web_dir.is_dir() {
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(web_dir.join("index.html")));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir.display(), "Chat widget static file serving enabled");
    }

    router
}

/// GET /health - Liveness plus a store round trip.
///
/// Always 200; a store failure shows up as `"database": "unavailable"`.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let database = match state.db_pool.ping().await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            "unavailable"
        }
    };

    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
