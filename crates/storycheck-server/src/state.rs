use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use storycheck_core::config::Config;
use storycheck_core::{IssueSource, LazyTracker, StoryService};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub stories: Arc<StoryService<Arc<dyn IssueSource>>>,
}

impl AppState {
    /// Build state from `.storycheck/config.yaml` under `root`, fetching
    /// issues from the configured tracker.
    ///
    /// The tracker client is built on first use, so missing credentials only
    /// fail the tracker-backed routes.
    pub fn new(root: PathBuf) -> anyhow::Result<Self> {
        let config = Config::load(&root).context("failed to load config")?;
        if let Err(e) = config.tracker.api_token() {
            tracing::warn!(error = %e, "tracker-backed routes will fail until credentials are set");
        }
        let tracker = LazyTracker::new(config.tracker);
        Ok(Self::with_source(root, Arc::new(tracker)))
    }

    pub fn with_source(root: PathBuf, source: Arc<dyn IssueSource>) -> Self {
        Self {
            root,
            stories: Arc::new(StoryService::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storycheck_core::{IssueId, RichDocument};

    struct Empty;

    impl IssueSource for Empty {
        fn fetch_description(&self, _id: &IssueId) -> storycheck_core::Result<Option<RichDocument>> {
            Ok(None)
        }
    }

    #[test]
    fn with_source_stores_root() {
        let state = AppState::with_source(PathBuf::from("/tmp/test"), Arc::new(Empty));
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
        assert!(state.stories.is_empty());
    }

    #[test]
    fn new_requires_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = AppState::new(dir.path().to_path_buf()).err().unwrap();
        assert!(format!("{err:#}").contains("not initialized"));
    }

    #[test]
    fn new_starts_without_token() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::new("https://t.example", Some("a@b.c".to_string()));
        config.tracker.token_env = "STORYCHECK_STATE_TEST_UNSET_TOKEN".to_string();
        config.save(dir.path()).unwrap();

        let state = AppState::new(dir.path().to_path_buf()).unwrap();
        let err = state
            .stories
            .analyze_issue(&IssueId::parse("PROJ-1").unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("STORYCHECK_STATE_TEST_UNSET_TOKEN"));
    }
}
