//! Template version bookkeeping.
//!
//! The version lives at `template.version` in the project file. Updates touch
//! only that value so hand-written comments and layout survive.

use serde_yaml::Value;
use tracing::warn;

use crate::domain::document::{self, Document, display_scalar, lookup};
use crate::domain::error::DomainError;

/// Reported when the current version cannot be read.
pub const UNKNOWN: &str = "unknown";

/// Reported when the latest version cannot be determined.
pub const LATEST: &str = "latest";

pub const VERSION_PATH: &str = "template.version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub current: String,
    pub latest: String,
    pub update_available: bool,
}

impl VersionStatus {
    /// An update is available when the versions differ and neither side is
    /// the floating `latest` tag.
    pub fn compare(current: impl Into<String>, latest: impl Into<String>) -> Self {
        let current = current.into();
        let latest = latest.into();
        let update_available = current != latest && current != LATEST && latest != LATEST;
        Self {
            current,
            latest,
            update_available,
        }
    }
}

/// `template.version` as a string, if present and non-null.
pub fn read_template_version(doc: &Document) -> Option<String> {
    match lookup(doc, VERSION_PATH)? {
        Value::Null => None,
        value => Some(display_scalar(value)),
    }
}

/// Replace the value of `template.version` in `text`.
///
/// Block-style documents are edited in place: only the value token changes,
/// keeping its quoting style and any trailing comment. An edit that does not
/// read back as `version`, and any other layout, is re-serialized instead.
pub fn set_template_version(text: &str, version: &str) -> Result<String, DomainError> {
    let doc = document::parse_document(text)?;
    if lookup(&doc, VERSION_PATH).is_none() {
        return Err(DomainError::MissingField {
            field: VERSION_PATH,
        });
    }

    if let Some(edited) = edit_in_place(text, version) {
        let reread = document::parse_document(&edited)
            .ok()
            .and_then(|doc| read_template_version(&doc));
        if reread.as_deref() == Some(version) {
            return Ok(edited);
        }
    }

    warn!("template.version could not be edited in place; rewriting the whole file");
    let mut doc = doc;
    if let Some(Value::Mapping(template)) = doc.get_mut("template") {
        template.insert(Value::from("version"), Value::from(version));
    }
    document::render_document(&doc)
}

fn edit_in_place(text: &str, version: &str) -> Option<String> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    let start = lines
        .iter()
        .position(|line| key_of(line, 0) == Some(("template", true)))?;

    let mut child_indent = None;
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        let content = line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = content.len() - trimmed.len();
        if indent == 0 {
            break;
        }
        let expected = *child_indent.get_or_insert(indent);
        if indent != expected {
            continue;
        }
        if key_of(line, indent).map(|(key, _)| key) == Some("version") {
            let replaced = replace_value(line, indent, version)?;
            let mut out = String::with_capacity(text.len() + version.len());
            for (i, l) in lines.iter().copied().enumerate() {
                out.push_str(if i == idx { replaced.as_str() } else { l });
            }
            return Some(out);
        }
    }
    None
}

/// Key at `indent`, and whether the line holds nothing after the colon.
fn key_of(line: &str, indent: usize) -> Option<(&str, bool)> {
    let content = line.trim_end_matches(['\n', '\r']);
    let rest = content.get(indent..)?;
    if rest.starts_with(char::is_whitespace) {
        return None;
    }
    let colon = rest.find(':')?;
    let key = &rest[..colon];
    let after = &rest[colon + 1..];
    if !after.is_empty() && !after.starts_with(' ') {
        return None;
    }
    let key = key.trim_matches(|c| c == '"' || c == '\'');
    let after = after.trim_start();
    let opens_block = after.is_empty() || after.starts_with('#');
    Some((key, opens_block))
}

fn replace_value(line: &str, indent: usize, version: &str) -> Option<String> {
    let body_end = line.trim_end_matches(['\n', '\r']).len();
    let (body, ending) = line.split_at(body_end);

    let colon = indent + body[indent..].find(':')?;
    let head = &body[..=colon];
    let rest = &body[colon + 1..];
    let value_start = rest.len() - rest.trim_start().len();
    let (gap, value_and_tail) = rest.split_at(value_start);

    let (token_len, quote) = match value_and_tail.chars().next() {
        Some(q @ ('"' | '\'')) => (value_and_tail[1..].find(q)? + 2, Some(q)),
        Some('#') | None => (0, None),
        Some(_) => {
            let end = value_and_tail.find(" #").unwrap_or(value_and_tail.len());
            (value_and_tail[..end].trim_end().len(), None)
        }
    };
    let tail = &value_and_tail[token_len..];

    let token = match quote {
        Some('\'') => single_quoted(version),
        Some(_) => double_quoted(version),
        None if plain_is_string(version) => version.to_owned(),
        None => double_quoted(version),
    };
    let gap = if gap.is_empty() { " " } else { gap };
    let tail = if token_len == 0 && !tail.is_empty() && !tail.starts_with(' ') {
        format!(" {tail}")
    } else {
        tail.to_owned()
    };

    Some(format!("{head}{gap}{token}{tail}{ending}"))
}

fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn double_quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Whether `s` written unquoted still reads back as the same string.
fn plain_is_string(s: &str) -> bool {
    !s.is_empty()
        && !s.contains(": ")
        && !s.contains(" #")
        && matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(ref v)) if v == s)
}
