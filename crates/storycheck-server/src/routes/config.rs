use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config — read-only view of `.storycheck/config.yaml`.
///
/// The API token is never part of the file, so the whole struct is safe to
/// return.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = storycheck_core::config::Config::load(&root)?;
        let json = serde_json::to_value(&config)?;
        Ok::<_, storycheck_core::StorycheckError>(json)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
