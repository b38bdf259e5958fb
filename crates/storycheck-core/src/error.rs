use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorycheckError {
    #[error("not initialized: run 'storycheck init'")]
    NotInitialized,

    #[error("Unable to get issue ID")]
    IssueIdUnresolved,

    #[error("invalid issue id '{0}': must be a non-empty key or number")]
    InvalidIssueId(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("missing tracker credentials: {0}")]
    MissingCredentials(String),

    #[error("tracker returned {status} for issue {issue}")]
    TrackerStatus { issue: String, status: u16 },

    #[error("malformed tracker response for issue {issue}: {reason}")]
    MalformedResponse { issue: String, reason: String },

    #[error("tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorycheckError>;
