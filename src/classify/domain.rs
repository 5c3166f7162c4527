//! Domain tagging

use super::compile_pattern;
use crate::config::{Domain, DomainRule};
use crate::error::Result;
use regex::Regex;

/// Tags an exchange with the first domain whose pattern matches.
///
/// Unlike the pressure and axiom classifiers this does not score: table
/// order alone decides, so the result for text matching several domains is
/// always the earliest one.
pub struct DomainClassifier {
    rules: Vec<(Domain, Regex)>,
}

impl DomainClassifier {
    pub fn new(rules: &[DomainRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| Ok((rule.domain, compile_pattern(rule.domain.as_str(), &rule.pattern)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn classify(&self, text: &str) -> Domain {
        self.rules
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(domain, _)| *domain)
            .unwrap_or_default()
    }
}
