//! Conversation normalization
//!
//! Turns heterogeneous archive files into a uniform list of
//! [`Conversation`]s. A file's extension picks an ordered chain of format
//! attempts; the first attempt that parses wins:
//!
//! ```text
//! .json        → [Json]
//! .jsonl       → [Jsonl]
//! .txt / .md   → [Text]
//! anything else→ [Json, Text]
//! ```
//!
//! Directories are walked recursively. A file that fails every attempt is
//! logged and skipped there, while the same failure on an explicitly named
//! file is returned to the caller.

pub mod json;
pub mod jsonl;
pub mod text;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use walkdir::WalkDir;

/// Roles that count as the user side of an exchange
pub const USER_ROLES: &[&str] = &["user", "human", "me", "unknown"];

/// Whether a free-form role string is user-like. Everything else,
/// including an empty role, is treated as the assistant side.
pub fn is_user_role(role: &str) -> bool {
    let role = role.to_lowercase();
    USER_ROLES.contains(&role.as_str())
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl Turn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn is_user_like(&self) -> bool {
        is_user_role(&self.role)
    }
}

/// One logical conversation recovered from an archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Turn>,
    /// Path of the file this conversation came from
    pub source: String,
}

/// Archive format a file can be parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Jsonl,
    Text,
}

impl Format {
    /// Ordered chain of formats to attempt for a file
    pub fn chain_for(path: &Path) -> &'static [Format] {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("json") => &[Format::Json],
            Some("jsonl") => &[Format::Jsonl],
            Some("txt") | Some("md") => &[Format::Text],
            _ => &[Format::Json, Format::Text],
        }
    }

    pub fn parse(self, content: &str, source: &Path) -> Result<Vec<Conversation>> {
        match self {
            Format::Json => json::parse(content, source),
            Format::Jsonl => jsonl::parse(content, source),
            Format::Text => text::parse(content, source),
        }
    }
}

/// Normalize a file or directory into conversations.
pub fn normalize(path: impl AsRef<Path>) -> Result<Vec<Conversation>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    if path.is_dir() {
        normalize_directory(path)
    } else {
        normalize_file(path)
    }
}

/// Normalize a single file, trying each format in its chain.
pub fn normalize_file(path: &Path) -> Result<Vec<Conversation>> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut last_error = None;
    for format in Format::chain_for(path) {
        match format.parse(&content, path) {
            Ok(conversations) => {
                tracing::debug!(
                    "Parsed {} as {:?}: {} conversations",
                    path.display(),
                    format,
                    conversations.len()
                );
                return Ok(conversations);
            }
            Err(e) => {
                tracing::debug!("{} is not {:?}: {}", path.display(), format, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| Error::Format(format!("No parser for {}", path.display()))))
}

fn normalize_directory(dir: &Path) -> Result<Vec<Conversation>> {
    let mut conversations = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.path().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .display()
            .to_string();
        match normalize_file(entry.path()) {
            Ok(found) => conversations.extend(found),
            Err(e) => tracing::warn!("Skipping {}: {}", relative, e),
        }
    }

    Ok(conversations)
}

/// JavaScript-style truthiness of an optional JSON value
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Non-empty string (or number) field of a JSON object
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Best-effort text of a message content value.
///
/// Strings pass through; arrays keep their string items and the `text` of
/// block objects, joined by newlines; other objects are searched for
/// `text`, `parts` or `content` before falling back to their JSON.
pub(crate) fn flatten_content(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                Value::Object(obj) => obj
                    .get("text")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                other => Some(other.to_string()),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(obj) => {
            if let Some(text) = obj.get("text").and_then(Value::as_str) {
                text.to_string()
            } else if let Some(parts) = obj.get("parts") {
                flatten_content(parts)
            } else if let Some(content) = obj.get("content") {
                flatten_content(content)
            } else {
                value.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Build a turn from a loosely shaped message object
pub(crate) fn turn_from_value(value: &Value) -> Turn {
    if !value.is_object() {
        return Turn::new("", flatten_content(value));
    }

    Turn {
        role: string_field(value, "role").unwrap_or_default(),
        content: value.get("content").map(flatten_content).unwrap_or_default(),
        timestamp: value
            .get("timestamp")
            .or_else(|| value.get("create_time"))
            .and_then(Value::as_f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_user_roles() {
        for role in ["user", "USER", "Human", "me", "unknown"] {
            assert!(is_user_role(role), "{} should be user-like", role);
        }
        for role in ["assistant", "ai", "claude", "system", "", "@bob"] {
            assert!(!is_user_role(role), "{} should not be user-like", role);
        }
    }

    #[test]
    fn test_format_chain() {
        assert_eq!(Format::chain_for(Path::new("a.json")), &[Format::Json]);
        assert_eq!(Format::chain_for(Path::new("a.JSONL")), &[Format::Jsonl]);
        assert_eq!(Format::chain_for(Path::new("a.md")), &[Format::Text]);
        assert_eq!(Format::chain_for(Path::new("a.txt")), &[Format::Text]);
        assert_eq!(
            Format::chain_for(Path::new("export.log")),
            &[Format::Json, Format::Text]
        );
        assert_eq!(
            Format::chain_for(Path::new("README")),
            &[Format::Json, Format::Text]
        );
    }

    #[test]
    fn test_unknown_extension_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        fs::write(&path, "User: hello\nAssistant: hi").unwrap();

        let conversations = normalize(&path).unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].messages.len(), 2);
        assert_eq!(conversations[0].id, "chat");
    }

    #[test]
    fn test_unknown_extension_prefers_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.dat");
        fs::write(&path, r#"{"id": "x", "messages": [{"role": "user", "content": "hi"}]}"#)
            .unwrap();

        let conversations = normalize(&path).unwrap();
        assert_eq!(conversations[0].id, "x");
    }

    #[test]
    fn test_missing_input() {
        let err = normalize("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn test_invalid_json_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(normalize(&path).is_err());
    }

    #[test]
    fn test_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("good.json"),
            r#"[{"messages": [{"role": "user", "content": "a"}]}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("bad.json"), "][").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/notes.txt"), "Human: hey").unwrap();

        let conversations = normalize(dir.path()).unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].id, "conv_0");
        assert_eq!(conversations[1].id, "notes");
    }

    #[test]
    fn test_invalid_utf8_is_recovered_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.txt");
        fs::write(&path, b"User: caf\xff\nAssistant: ok").unwrap();

        let conversations = normalize(&path).unwrap();
        assert!(conversations[0].messages[0].content.starts_with("caf"));
    }

    #[test]
    fn test_flatten_content() {
        assert_eq!(flatten_content(&json!("plain")), "plain");
        assert_eq!(flatten_content(&json!(null)), "");
        assert_eq!(
            flatten_content(&json!(["a", {"type": "text", "text": "b"}, {"type": "image"}])),
            "a\nb"
        );
        assert_eq!(flatten_content(&json!({"parts": ["x", "y"]})), "x\ny");
        assert_eq!(flatten_content(&json!({"content": "nested"})), "nested");
        assert_eq!(flatten_content(&json!({"other": 1})), r#"{"other":1}"#);
        assert_eq!(flatten_content(&json!(42)), "42");
    }

    #[test]
    fn test_turn_from_value() {
        let turn = turn_from_value(&json!({"role": "human", "content": "hi", "timestamp": 12.5}));
        assert_eq!(turn.role, "human");
        assert_eq!(turn.content, "hi");
        assert_eq!(turn.timestamp, Some(12.5));
        assert!(turn.is_user_like());

        let turn = turn_from_value(&json!({"content": "no role"}));
        assert_eq!(turn.role, "");
        assert!(!turn.is_user_like());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
        assert!(is_truthy(Some(&json!("x"))));
    }
}
