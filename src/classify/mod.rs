//! Keyword classification of conversational exchanges
//!
//! Every classifier here is deterministic regex matching over compiled
//! keyword tables from [`crate::config`]. Two selection strategies coexist
//! and are kept apart on purpose:
//! - best score wins (pressure, axiom), ties resolved by table order
//! - first match wins (domain), scanning in table order
//!
//! The outcome detector is a plain any-match test over hedging markers.

pub mod axiom;
pub mod domain;
pub mod outcome;
pub mod pressure;

pub use axiom::AxiomClassifier;
pub use domain::DomainClassifier;
pub use outcome::{Outcome, OutcomeDetector};
pub use pressure::{is_admitted, PressureScore, PressureScorer, ADMISSION_THRESHOLD};

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Compile one table pattern, case-insensitively.
pub(crate) fn compile_pattern(name: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Config(format!("Invalid regex pattern for '{}': {}", name, e)))
}

/// Number of non-overlapping matches of `pattern` in `text`.
pub(crate) fn count_matches(pattern: &Regex, text: &str) -> usize {
    pattern.find_iter(text).count()
}
