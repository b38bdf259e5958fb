use crate::document::lenient;
use crate::error::{Result, StorycheckError};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// IssueId
// ---------------------------------------------------------------------------

static ISSUE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn issue_id_re() -> &'static Regex {
    ISSUE_ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-]*$").unwrap())
}

/// Opaque tracker identifier: a numeric id (`10042`) or an issue key (`PROJ-12`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 255 || !issue_id_re().is_match(trimmed) {
            return Err(StorycheckError::InvalidIssueId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Accept a JSON string or non-negative integer.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => match n.as_u64() {
                Some(id) => Self::parse(&id.to_string()),
                None => Err(StorycheckError::InvalidIssueId(n.to_string())),
            },
            other => Err(StorycheckError::InvalidIssueId(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IssueId {
    type Err = StorycheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for IssueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// IssueContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionContext {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<Value>,
}

/// Ambient host context a request arrives with. Identifier fields are kept
/// as raw JSON because hosts send ids as strings or numbers. Nodes of the
/// wrong shape decode as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueContext {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub extension: Option<ExtensionContext>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueRef>,
}

impl IssueContext {
    /// Candidate identifiers in lookup order: `extension.issue.id`,
    /// `issue.id`, `extension.issueKey`.
    fn candidates(&self) -> [Option<&Value>; 3] {
        let ext = self.extension.as_ref();
        [
            ext.and_then(|e| e.issue.as_ref()).and_then(|i| i.id.as_ref()),
            self.issue.as_ref().and_then(|i| i.id.as_ref()),
            ext.and_then(|e| e.issue_key.as_ref()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Null, false, zero and the empty string do not count as a value.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Pick the issue to analyze: an explicit payload id wins, then the context
/// fallbacks. The first present candidate must be a valid id.
pub fn resolve_issue_id(payload: Option<&Value>, context: Option<&IssueContext>) -> Result<IssueId> {
    let from_context = context.map(IssueContext::candidates).unwrap_or_default();
    let found = std::iter::once(payload)
        .chain(from_context)
        .flatten()
        .find(|v| is_present(v));

    match found {
        Some(value) => IssueId::from_value(value),
        None => Err(StorycheckError::IssueIdUnresolved),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
