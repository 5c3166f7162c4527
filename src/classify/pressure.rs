//! Pressure scoring for user turns

use super::{compile_pattern, count_matches};
use crate::config::{PressureRule, PressureType};
use crate::error::Result;
use regex::Regex;

/// Minimum pressure score for an exchange to become an anecdote (inclusive).
pub const ADMISSION_THRESHOLD: f64 = 0.3;

const MATCH_WEIGHT: f64 = 0.2;
const QUESTION_BOOST: f64 = 0.1;
const EMPHASIS_BOOST: f64 = 0.05;

/// Whether a pressure score clears the admission threshold
pub fn is_admitted(score: f64) -> bool {
    score >= ADMISSION_THRESHOLD
}

/// Pressure rating of a single text block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureScore {
    /// Intensity in [0, 1]
    pub score: f64,
    /// Dominant category
    pub kind: PressureType,
}

impl PressureScore {
    pub fn is_admitted(&self) -> bool {
        is_admitted(self.score)
    }
}

struct CompiledRule {
    category: PressureType,
    pattern: Regex,
}

/// Rates how adversarial or demanding a text is
pub struct PressureScorer {
    rules: Vec<CompiledRule>,
}

impl PressureScorer {
    /// Compile the pressure table; rule order breaks ties.
    pub fn new(rules: &[PressureRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    category: rule.category,
                    pattern: compile_pattern(rule.category.as_str(), &rule.pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Score a text block.
    ///
    /// Each category scores `min(matches * 0.2, 1.0)`; the strictly highest
    /// one is dominant. Punctuation boosts are added after selection and the
    /// total is capped at 1.0.
    pub fn score(&self, text: &str) -> PressureScore {
        let mut best = 0.0_f64;
        let mut kind = PressureType::General;

        for rule in &self.rules {
            let sub_score = (count_matches(&rule.pattern, text) as f64 * MATCH_WEIGHT).min(1.0);
            if sub_score > best {
                best = sub_score;
                kind = rule.category;
            }
        }

        let questions = text.matches('?').count();
        best += questions as f64 * QUESTION_BOOST;

        let emphasis = text.matches('!').count();
        best += emphasis as f64 * EMPHASIS_BOOST;

        PressureScore {
            score: best.min(1.0),
            kind,
        }
    }
}
