//! Line-delimited JSON session logs

use super::{flatten_content, is_truthy, string_field, turn_from_value, Conversation, Turn};
use crate::error::Result;
use serde_json::Value;
use std::path::Path;

/// Parse a session log into at most one conversation.
///
/// Lines tagged `"type": "user" | "assistant"` carry their text in
/// `message`; other lines are accepted in the generic `{role, content}`
/// shape. Lines that are not valid JSON are skipped.
pub fn parse(content: &str, source: &Path) -> Result<Vec<Conversation>> {
    let mut session_id: Option<String> = None;
    let mut messages = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let entry: Value = match serde_json::from_str(line) {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        let turn = match entry.get("type").and_then(Value::as_str) {
            Some(kind @ ("user" | "assistant")) => Turn {
                role: kind.to_string(),
                content: session_message_text(entry.get("message")),
                timestamp: entry.get("timestamp").and_then(Value::as_f64),
            },
            _ if is_truthy(entry.get("role")) && is_truthy(entry.get("content")) => {
                turn_from_value(&entry)
            }
            _ => continue,
        };

        // Named once, by the line that opens the session
        if messages.is_empty() {
            session_id = string_field(&entry, "session_id");
        }
        messages.push(turn);
    }

    if messages.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![Conversation {
        id: session_id.unwrap_or_else(|| "session".to_string()),
        title: "Untitled".to_string(),
        messages,
        source: source.display().to_string(),
    }])
}

fn session_message_text(message: Option<&Value>) -> String {
    match message {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(message) => match message.get("content") {
            content if is_truthy(content) => content.map(flatten_content).unwrap_or_default(),
            _ => message.to_string(),
        },
    }
}
