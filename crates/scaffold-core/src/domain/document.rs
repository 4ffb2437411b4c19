//! Configuration documents and the deep-merge primitive.
//!
//! A [`Document`] is an ordered YAML mapping. Every layer of the merge
//! pipeline (defaults, project, merged) is one of these, and key order is
//! insertion order so the written output follows the inputs.

use serde_yaml::{Mapping, Value};

use crate::domain::error::DomainError;

/// An ordered string-keyed YAML mapping.
pub type Document = Mapping;

/// Parse YAML text into a [`Document`].
///
/// Blank input and an explicit `null` document both yield an empty mapping.
pub fn parse_document(text: &str) -> Result<Document, DomainError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }

    let value: Value =
        serde_yaml::from_str(text).map_err(|e| DomainError::MalformedDocument {
            reason: e.to_string(),
        })?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Document::new()),
        other => Err(DomainError::NotAMapping {
            found: kind_name(&other),
        }),
    }
}

/// Serialize a [`Document`] in block style, preserving key order.
pub fn render_document(doc: &Document) -> Result<String, DomainError> {
    serde_yaml::to_string(doc).map_err(|e| DomainError::MalformedDocument {
        reason: e.to_string(),
    })
}

/// Deep-merge `overlay` on top of `base`.
///
/// If both sides hold a mapping for the same key, recurse. Otherwise the
/// overlay value wins outright: sequences are replaced, never concatenated.
/// Neither input is modified.
pub fn deep_merge(base: &Document, overlay: &Document) -> Document {
    let mut result = base.clone();
    for (key, overlay_val) in overlay {
        let merged = match (result.get(key), overlay_val) {
            (Some(Value::Mapping(base_map)), Value::Mapping(overlay_map)) => {
                Value::Mapping(deep_merge(base_map, overlay_map))
            }
            _ => overlay_val.clone(),
        };
        result.insert(key.clone(), merged);
    }
    result
}

/// Resolve a dotted path such as `image.name`.
pub fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// Flatten a document into `a.b.c: value` lines for diagnostics.
///
/// Sequences collapse to `[N items]`; anything deeper than `max_depth`
/// is shown as `<nested>`.
pub fn summarize(doc: &Document, max_depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    summarize_into(doc, "", max_depth, 0, &mut lines);
    lines
}

fn summarize_into(
    doc: &Document,
    prefix: &str,
    max_depth: usize,
    depth: usize,
    lines: &mut Vec<String>,
) {
    if depth >= max_depth {
        lines.push(format!("{prefix}: <nested>"));
        return;
    }

    for (key, value) in doc {
        let key = display_scalar(key);
        let full_key = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Mapping(map) => summarize_into(map, &full_key, max_depth, depth + 1, lines),
            Value::Sequence(seq) => lines.push(format!("{full_key}: [{} items]", seq.len())),
            other => lines.push(format!("{full_key}: {}", display_scalar(other))),
        }
    }
}

/// Human-readable form of a scalar (strings unquoted).
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
