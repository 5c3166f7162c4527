//! Anecdote records

use crate::classify::Outcome;
use crate::config::{Domain, PressureType};
use crate::manifold::Manifold;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Species tag carried by every anecdote
pub const SPECIES: &str = "M";

/// Maximum characters of the user prompt kept in `context`
pub const CONTEXT_LIMIT: usize = 200;

/// Maximum characters of the response kept in `clean_outcome`
pub const OUTCOME_LIMIT: usize = 500;

/// Maximum characters of a synthesized title
pub const TITLE_LIMIT: usize = 80;

/// A scored exchange extracted from a conversation.
///
/// Built once by the extractor and never modified; serialization is the end
/// of its life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anecdote {
    pub id: String,
    pub title: String,
    /// Axiom number, 1 through 5
    pub axiom: u8,
    pub axiom_name: String,
    pub species: String,
    pub domain: Domain,
    pub pressure_type: PressureType,
    pub outcome: Outcome,
    /// Reserved, always null
    pub failure_mode: Option<String>,
    /// User prompt, truncated
    pub context: String,
    /// Full user prompt
    pub pressure: String,
    pub axiom_trigger: String,
    /// Assistant response, truncated
    pub clean_outcome: String,
    pub source_file: String,
    /// Index of the user turn within its conversation
    pub source_turn: usize,
    pub source_conversation: String,
    pub extracted_at: DateTime<Utc>,
    pub manifold: Manifold,
    pub notes: String,
}

/// Issues anecdote ids that are unique for the lifetime of the generator.
pub struct AnecdoteIds {
    rng: StdRng,
    issued: HashSet<String>,
}

impl Default for AnecdoteIds {
    fn default() -> Self {
        Self::new()
    }
}

impl AnecdoteIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    /// Next id: eight uppercase hex digits, redrawn on collision.
    pub fn next_id(&mut self) -> String {
        loop {
            let id = format!("{:08X}", self.rng.gen::<u32>());
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Cut `text` to at most `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Title from the first sentence-delimited clause of a prompt
pub fn title_from(text: &str) -> String {
    let first = text.split(['.', '!', '?']).next().unwrap_or_default();
    truncate(first.trim(), TITLE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_text() {
        let out = truncate("abcdefghijk", 10);
        assert_eq!(out, "abcdefg...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(250);
        let out = truncate(&text, CONTEXT_LIMIT);
        assert_eq!(out.chars().count(), CONTEXT_LIMIT);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_title_from_first_clause() {
        assert_eq!(title_from("  Why did you say that? Explain."), "Why did you say that");
        assert_eq!(title_from("No punctuation here"), "No punctuation here");
        assert_eq!(title_from("!leading"), "");
    }

    #[test]
    fn test_title_truncated() {
        let title = title_from(&"word ".repeat(40));
        assert_eq!(title.chars().count(), TITLE_LIMIT);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_ids_are_unique_and_hex() {
        let mut ids = AnecdoteIds::new();
        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            let id = ids.next_id();
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn test_seeded_ids_reproducible() {
        let a: Vec<String> = (0..5).scan(AnecdoteIds::seeded(7), |g, _| Some(g.next_id())).collect();
        let b: Vec<String> = (0..5).scan(AnecdoteIds::seeded(7), |g, _| Some(g.next_id())).collect();
        assert_eq!(a, b);
    }
}
