use crate::analysis::{analyze_document, AnalysisResult};
use crate::error::Result;
use crate::issue::IssueId;
use crate::tracker::IssueSource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// IssueAnalysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueAnalysis {
    pub issue_id: IssueId,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
}

// ---------------------------------------------------------------------------
// StoryService
// ---------------------------------------------------------------------------

/// Fetches issue descriptions and scores them, at most once per issue.
///
/// Successful analyses are cached by issue id until `refresh`, `forget`, or
/// `clear`. Failures are never cached. The cache lock is not held while
/// fetching.
pub struct StoryService<S> {
    source: S,
    cache: Mutex<HashMap<IssueId, IssueAnalysis>>,
}

impl<S: IssueSource> StoryService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<IssueId, IssueAnalysis>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn analyze_issue(&self, id: &IssueId) -> Result<IssueAnalysis> {
        if let Some(hit) = self.cached(id) {
            tracing::debug!(issue = %id, "analysis cache hit");
            return Ok(hit);
        }
        tracing::debug!(issue = %id, "analysis cache miss");

        let description = self.source.fetch_description(id)?;
        let analysis = IssueAnalysis {
            issue_id: id.clone(),
            analyzed_at: Utc::now(),
            result: analyze_document(description.as_ref()),
        };
        tracing::debug!(
            issue = %id,
            completed = analysis.result.completed_count(),
            "issue analyzed"
        );

        self.lock().insert(id.clone(), analysis.clone());
        Ok(analysis)
    }

    /// Drop any cached entry and fetch again.
    pub fn refresh(&self, id: &IssueId) -> Result<IssueAnalysis> {
        self.forget(id);
        self.analyze_issue(id)
    }

    pub fn cached(&self, id: &IssueId) -> Option<IssueAnalysis> {
        self.lock().get(id).cloned()
    }

    /// Returns true if an entry was evicted.
    pub fn forget(&self, id: &IssueId) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
