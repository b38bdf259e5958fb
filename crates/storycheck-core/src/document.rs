use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// Decode an optional field, treating a value of the wrong JSON type as absent.
pub fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode an optional node sequence. A non-array is absent; a malformed
/// element becomes an empty node so it still occupies its position.
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
    ))
}

// ---------------------------------------------------------------------------
// Inline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inline {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Inline>>,
}

impl Block {
    pub fn paragraph<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: Some("paragraph".to_string()),
            content: Some(texts.into_iter().map(Inline::text).collect()),
        }
    }

    /// Inline texts concatenated with no separator. Missing text counts as empty.
    pub fn plain_text(&self) -> String {
        self.content
            .as_deref()
            .map(|inlines| {
                inlines
                    .iter()
                    .map(|inline| inline.text.as_deref().unwrap_or(""))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// RichDocument
// ---------------------------------------------------------------------------

/// A tracker description document: a root holding blocks of inline text nodes.
///
/// Unknown fields are ignored and fields of the wrong JSON type decode as
/// absent, so any JSON object is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichDocument {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Block>>,
}

impl RichDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            kind: Some("doc".to_string()),
            content: Some(blocks),
        }
    }

    /// Interpret a JSON value as a document. `null` and non-objects are absent.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn plain_text(&self) -> String {
        extract_text(Some(self))
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Flatten a document into plain text: per-block inline text joined by a
/// single space, in document order. An absent document yields "".
pub fn extract_text(document: Option<&RichDocument>) -> String {
    let Some(blocks) = document.and_then(|d| d.content.as_deref()) else {
        return String::new();
    };
    blocks
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
