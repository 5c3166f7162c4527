//! JSON archive shapes
//!
//! Recognized in this order:
//! 1. an array of tree exports (`mapping` of node id → message node)
//! 2. an array of `{id?, title?, messages[]}` objects
//! 3. a single `{id?, title?, messages[]}` object

use super::{flatten_content, is_truthy, string_field, turn_from_value, Conversation, Turn};
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;
use uuid::Uuid;

const UNTITLED: &str = "Untitled";

pub fn parse(content: &str, source: &Path) -> Result<Vec<Conversation>> {
    let data: Value = serde_json::from_str(content)?;
    let source = source.display().to_string();

    if let Value::Array(items) = &data {
        let first = items.first();
        if is_truthy(first.and_then(|f| f.get("mapping"))) {
            return Ok(items.iter().map(|c| tree_export(c, &source)).collect());
        }
        if is_truthy(first.and_then(|f| f.get("messages"))) {
            return Ok(items
                .iter()
                .enumerate()
                .map(|(i, c)| message_list(c, format!("conv_{}", i), &source))
                .collect());
        }
    }

    if is_truthy(data.get("messages")) {
        return Ok(vec![message_list(&data, "single".to_string(), &source)]);
    }

    Err(Error::Format("Unrecognized JSON format".to_string()))
}

fn message_list(conv: &Value, default_id: String, source: &str) -> Conversation {
    let messages = conv
        .get("messages")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(turn_from_value).collect())
        .unwrap_or_default();

    Conversation {
        id: string_field(conv, "id").unwrap_or(default_id),
        title: string_field(conv, "title").unwrap_or_else(|| UNTITLED.to_string()),
        messages,
        source: source.to_string(),
    }
}

/// Reassemble a tree export: every node carrying `message.content.parts`
/// becomes a turn, ordered by `create_time` (missing counts as 0).
fn tree_export(conv: &Value, source: &str) -> Conversation {
    let mut messages: Vec<Turn> = conv
        .get("mapping")
        .and_then(Value::as_object)
        .map(|mapping| mapping.values().filter_map(tree_node_turn).collect())
        .unwrap_or_default();

    messages.sort_by(|a, b| {
        a.timestamp
            .unwrap_or(0.0)
            .total_cmp(&b.timestamp.unwrap_or(0.0))
    });

    Conversation {
        id: string_field(conv, "id").unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: string_field(conv, "title").unwrap_or_else(|| UNTITLED.to_string()),
        messages,
        source: source.to_string(),
    }
}

fn tree_node_turn(node: &Value) -> Option<Turn> {
    let message = node.get("message")?;
    let parts = message.get("content")?.get("parts")?;
    if !is_truthy(Some(parts)) {
        return None;
    }

    let role = message
        .get("author")
        .and_then(|a| string_field(a, "role"))
        .unwrap_or_else(|| "unknown".to_string());

    Some(Turn {
        role,
        content: flatten_content(parts),
        timestamp: message.get("create_time").and_then(Value::as_f64),
    })
}
