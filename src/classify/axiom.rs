//! Axiom classification

use super::compile_pattern;
use crate::config::{Axiom, AxiomRule};
use crate::error::Result;
use regex::Regex;

const PATTERN_WEIGHT: f64 = 0.5;

struct CompiledAxiom {
    axiom: Axiom,
    patterns: Vec<Regex>,
}

/// Maps an exchange to the behavioral principle it touches most
pub struct AxiomClassifier {
    axioms: Vec<CompiledAxiom>,
}

impl AxiomClassifier {
    pub fn new(rules: &[AxiomRule]) -> Result<Self> {
        let axioms = rules
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|p| compile_pattern(rule.axiom.name(), p))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledAxiom {
                    axiom: rule.axiom,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { axioms })
    }

    /// Each axiom earns 0.5 per pattern that matches at least once.
    /// Highest score wins, earlier axioms win ties, axiom 1 if nothing matches.
    pub fn classify(&self, text: &str) -> Axiom {
        let mut best = 0.0_f64;
        let mut selected = Axiom::default();

        for compiled in &self.axioms {
            let hits = compiled.patterns.iter().filter(|p| p.is_match(text)).count();
            let score = hits as f64 * PATTERN_WEIGHT;
            if score > best {
                best = score;
                selected = compiled.axiom;
            }
        }

        selected
    }
}
