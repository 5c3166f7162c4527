//! Freeform transcripts with role markers at line starts

use super::{Conversation, Turn};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static NAMED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(User|Human|Assistant|AI|Claude|Grok|ChatGPT):\s*")
        .expect("valid named marker pattern")
});

static HANDLE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(?-u:\w)+:\s*").expect("valid handle marker pattern"));

/// Split a transcript into turns at `Role:` / `@handle:` markers.
///
/// Lines before the first marker are dropped. Text with no marker at all
/// becomes a single `unknown` turn holding the whole content.
pub fn parse(content: &str, source: &Path) -> Result<Vec<Conversation>> {
    let mut turns = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in content.split('\n') {
        let marker = [&*NAMED_MARKER, &*HANDLE_MARKER]
            .into_iter()
            .find_map(|pattern| pattern.find(line));

        if let Some(marker) = marker {
            if let Some((role, lines)) = current.take() {
                turns.push(Turn::new(role, lines.join("\n").trim()));
            }
            current = Some((role_of(marker.as_str()), vec![&line[marker.end()..]]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((role, lines)) = current {
        turns.push(Turn::new(role, lines.join("\n").trim()));
    }

    if turns.is_empty() {
        turns.push(Turn::new("unknown", content));
    }

    Ok(vec![Conversation {
        id: source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        title: source
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        messages: turns,
        source: source.display().to_string(),
    }])
}

fn role_of(marker: &str) -> String {
    marker
        .chars()
        .filter(|c| *c != ':' && *c != '@' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
