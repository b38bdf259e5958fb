use axum::extract::{Path, State};
use axum::Json;
use storycheck_core::{IssueAnalysis, IssueId};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/issues/:id/analysis — analysis for one issue, fetched at most once.
pub async fn get_analysis(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IssueAnalysis>, AppError> {
    let id = IssueId::parse(&id)?;
    let stories = app.stories.clone();
    let analysis = tokio::task::spawn_blocking(move || stories.analyze_issue(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(analysis))
}

/// DELETE /api/issues/:id/analysis — drop the cached analysis so the next
/// request fetches again.
pub async fn forget_analysis(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = IssueId::parse(&id)?;
    let evicted = app.stories.forget(&id);
    Ok(Json(serde_json::json!({
        "issueId": id,
        "evicted": evicted,
    })))
}
