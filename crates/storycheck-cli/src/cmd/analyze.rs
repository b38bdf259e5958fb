use crate::output::{print_analysis, print_json};
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use storycheck_core::{analyze, extract_text, RichDocument};

static NULL: Value = Value::Null;

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

pub fn run_document(file: Option<&Path>, show_text: bool, json: bool) -> anyhow::Result<()> {
    let raw = read_input(file)?;
    let value: Value = serde_json::from_str(&raw).context("input is not valid JSON")?;
    let document = RichDocument::from_value(document_value(&value));
    let text = extract_text(document.as_ref());
    let result = analyze(&text);

    if json {
        if show_text {
            return print_json(&serde_json::json!({
                "text": text,
                "result": result,
            }));
        }
        return print_json(&result);
    }

    if show_text {
        println!("Text: {text}\n");
    }
    print_analysis(&result, false)
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}

/// Locate the description inside the input: a full issue payload
/// (`fields.description`), a `{ "document": ... }` wrapper, or a bare document.
fn document_value(value: &Value) -> &Value {
    if let Some(fields) = value.get("fields") {
        return fields.get("description").unwrap_or(&NULL);
    }
    value.get("document").unwrap_or(value)
}

// ---------------------------------------------------------------------------
// text
// ---------------------------------------------------------------------------

pub fn run_text(text: &str, json: bool) -> anyhow::Result<()> {
    print_analysis(&analyze(text), json)
}
