use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use storycheck_core::document::lenient;
use storycheck_core::{
    analyze, analyze_document, resolve_issue_id, AnalysisResult, IssueAnalysis, IssueContext,
    RichDocument,
};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/analyze — score a description document.
///
/// Accepts `{ "document": <doc> }` or a bare document. A null or missing
/// document scores zero.
pub async fn analyze_doc(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(body) = body?;
    let value = body.get("document").unwrap_or(&body);
    let document = RichDocument::from_value(value);
    Ok(Json(analyze_document(document.as_ref())))
}

#[derive(Deserialize)]
pub struct AnalyzeTextBody {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
}

/// POST /api/analyze-text — score already-extracted plain text. A missing or
/// non-string `text` scores as empty.
pub async fn analyze_text(
    body: Result<Json<AnalyzeTextBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(body) = body?;
    Ok(Json(analyze(body.text.as_deref().unwrap_or_default())))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeStoryBody {
    #[serde(default)]
    issue_id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    context: Option<IssueContext>,
    /// Skip the cache and fetch the issue again.
    #[serde(default, deserialize_with = "lenient")]
    refresh: Option<bool>,
}

/// POST /api/analyze-story — resolve the issue from the payload or host
/// context, fetch its description, and score it.
pub async fn analyze_story(
    State(app): State<AppState>,
    body: Result<Json<AnalyzeStoryBody>, JsonRejection>,
) -> Result<Json<IssueAnalysis>, AppError> {
    let Json(body) = body?;
    let id = resolve_issue_id(body.issue_id.as_ref(), body.context.as_ref())?;
    let stories = app.stories.clone();
    let refresh = body.refresh.unwrap_or(false);
    let analysis = tokio::task::spawn_blocking(move || {
        if refresh {
            stories.refresh(&id)
        } else {
            stories.analyze_issue(&id)
        }
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn wrapped_and_bare_documents_score_the_same() {
        let doc = json!({
            "type": "doc",
            "content": [ { "type": "paragraph", "content": [ { "type": "text", "text": "Requirements" } ] } ]
        });
        let Json(bare) = analyze_doc(Ok(Json(doc.clone()))).await.unwrap();
        let Json(wrapped) = analyze_doc(Ok(Json(json!({ "document": doc }))))
            .await
            .unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.completed_count(), 1);
    }

    #[tokio::test]
    async fn null_document_scores_zero() {
        let Json(result) = analyze_doc(Ok(Json(json!({ "document": null }))))
            .await
            .unwrap();
        assert_eq!(result.completed_count(), 0);
    }

    #[tokio::test]
    async fn text_is_scored_directly() {
        let body = AnalyzeTextBody {
            text: Some("given when then".to_string()),
        };
        let Json(result) = analyze_text(Ok(Json(body))).await.unwrap();
        assert!(result.checks().user_story);
    }

    #[test]
    fn text_of_wrong_type_is_absent() {
        let body: AnalyzeTextBody = serde_json::from_value(json!({ "text": null })).unwrap();
        assert!(body.text.is_none());
        let body: AnalyzeTextBody = serde_json::from_value(json!({ "text": 12 })).unwrap();
        assert!(body.text.is_none());
    }

    #[test]
    fn story_body_tolerates_foreign_context() {
        let body: AnalyzeStoryBody = serde_json::from_value(json!({
            "issueId": "PROJ-1",
            "context": { "extension": "panel" },
            "refresh": "yes"
        }))
        .unwrap();
        assert!(body.context.is_some_and(|c| c.extension.is_none()));
        assert_eq!(body.refresh, None);
    }
}
