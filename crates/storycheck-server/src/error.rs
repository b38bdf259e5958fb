use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storycheck_core::error::StorycheckError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if self.0.is::<JsonRejection>() {
            return StatusCode::BAD_REQUEST;
        }
        let Some(e) = self.0.downcast_ref::<StorycheckError>() else {
            return StatusCode::INTERNAL_SERVER_ERROR;
        };
        match e {
            StorycheckError::IssueIdUnresolved
            | StorycheckError::InvalidIssueId(_)
            | StorycheckError::NotInitialized => StatusCode::BAD_REQUEST,
            StorycheckError::TrackerStatus { status: 404, .. } => StatusCode::NOT_FOUND,
            StorycheckError::TrackerStatus { .. }
            | StorycheckError::MalformedResponse { .. }
            | StorycheckError::Http(_) => StatusCode::BAD_GATEWAY,
            StorycheckError::InvalidConfig(_)
            | StorycheckError::MissingCredentials(_)
            | StorycheckError::Io(_)
            | StorycheckError::Yaml(_)
            | StorycheckError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %format!("{:#}", self.0), "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
