pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Pure analysis
        .route("/api/analyze", post(routes::analyze::analyze_doc))
        .route("/api/analyze-text", post(routes::analyze::analyze_text))
        // Tracker-backed analysis
        .route("/api/analyze-story", post(routes::analyze::analyze_story))
        .route(
            "/api/issues/{id}/analysis",
            get(routes::issues::get_analysis).delete(routes::issues::forget_analysis),
        )
        // Config
        .route("/api/config", get(routes::config::get_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the analysis server on `port` (0 = OS-assigned).
pub async fn serve(app_state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener).await
}

/// Start the analysis server on a pre-bound listener.
///
/// Lets the caller read the actual port before starting when `port = 0`.
pub async fn serve_on(app_state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(app_state);

    tracing::info!("storycheck server listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
