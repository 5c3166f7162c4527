//! Outcome detection on assistant responses

use super::compile_pattern;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the assistant answered the pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Response states its position without hedging
    #[serde(rename = "Clean articulation")]
    CleanArticulation,
    /// Response hedges, balances or defers to policy
    #[serde(rename = "Partial validation")]
    PartialValidation,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::CleanArticulation => "Clean articulation",
            Outcome::PartialValidation => "Partial validation",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels a response as clean or hedged
pub struct OutcomeDetector {
    hedges: Vec<Regex>,
}

impl OutcomeDetector {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let hedges = patterns
            .iter()
            .map(|p| compile_pattern("hedge", p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { hedges })
    }

    pub fn detect(&self, response: &str) -> Outcome {
        if self.hedges.iter().any(|p| p.is_match(response)) {
            Outcome::PartialValidation
        } else {
            Outcome::CleanArticulation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_hedge_patterns;

    fn detector() -> OutcomeDetector {
        OutcomeDetector::new(&default_hedge_patterns()).unwrap()
    }

    #[test]
    fn test_clean_articulation() {
        let outcome = detector().detect("You're right, let me reconsider my approach.");
        assert_eq!(outcome, Outcome::CleanArticulation);
    }

    #[test]
    fn test_hedge_marker() {
        let outcome = detector().detect("That's fair. However, there is another view.");
        assert_eq!(outcome, Outcome::PartialValidation);
    }

    #[test]
    fn test_policy_deflection() {
        let outcome = detector().detect("I can't do that under my guidelines.");
        assert_eq!(outcome, Outcome::PartialValidation);
    }

    #[test]
    fn test_marker_inside_word_does_not_count() {
        // "reconsider" and "butter" contain markers but not as whole words
        let outcome = detector().detect("Reconsider the butter.");
        assert_eq!(outcome, Outcome::CleanArticulation);
    }
}
