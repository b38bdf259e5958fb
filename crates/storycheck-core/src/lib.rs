pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod issue;
pub mod paths;
pub mod report;
pub mod service;
pub mod tracker;

pub use analysis::{analyze, analyze_document, AnalysisResult, Check, CheckResult};
pub use document::{extract_text, RichDocument};
pub use error::{Result, StorycheckError};
pub use issue::{resolve_issue_id, IssueContext, IssueId};
pub use service::{IssueAnalysis, StoryService};
pub use tracker::{IssueSource, LazyTracker, TrackerClient};
