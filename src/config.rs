//! Corpus Processor configuration management
//!
//! The keyword tables that drive every classifier live here as plain data.
//! Table order is significant: it is the enumeration order the classifiers
//! use to break ties (pressure, axioms) or to pick the first match (domains).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Main Corpus Processor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Hedging / compromise markers searched in the assistant response
    pub hedges: Vec<String>,

    /// Pressure categories, in tie-break order
    pub pressure: Vec<PressureRule>,

    /// Axioms, in tie-break order
    pub axioms: Vec<AxiomRule>,

    /// Domains, in first-match order
    pub domains: Vec<DomainRule>,

    /// Opposing keyword families for the manifold coordinates
    pub manifold: ManifoldConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            hedges: default_hedge_patterns(),
            pressure: default_pressure_rules(),
            axioms: default_axiom_rules(),
            domains: default_domain_rules(),
            manifold: ManifoldConfig::default(),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from a TOML file. Missing sections fall back to
    /// the built-in tables.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check table invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if let Some(rule) = self
            .pressure
            .iter()
            .find(|r| r.category == PressureType::General)
        {
            return Err(Error::Config(format!(
                "'{}' is the fallback pressure type and cannot carry a pattern",
                rule.category
            )));
        }
        if let Some(rule) = self.axioms.iter().find(|r| r.patterns.is_empty()) {
            return Err(Error::Config(format!(
                "axiom '{}' has no patterns",
                rule.axiom.name()
            )));
        }
        Ok(())
    }
}

/// Pressure category of a user turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureType {
    #[serde(rename = "Factual challenge")]
    FactualChallenge,
    #[serde(rename = "Frame conflict")]
    FrameConflict,
    #[serde(rename = "Authority pressure")]
    AuthorityPressure,
    #[serde(rename = "Ethical dilemma")]
    EthicalDilemma,
    #[serde(rename = "Technical constraint")]
    TechnicalConstraint,
    #[serde(rename = "Social pressure")]
    SocialPressure,
    #[serde(rename = "Performance demand")]
    PerformanceDemand,
    /// Fallback when no category keyword matches
    #[serde(rename = "General pressure")]
    General,
}

impl PressureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureType::FactualChallenge => "Factual challenge",
            PressureType::FrameConflict => "Frame conflict",
            PressureType::AuthorityPressure => "Authority pressure",
            PressureType::EthicalDilemma => "Ethical dilemma",
            PressureType::TechnicalConstraint => "Technical constraint",
            PressureType::SocialPressure => "Social pressure",
            PressureType::PerformanceDemand => "Performance demand",
            PressureType::General => "General pressure",
        }
    }
}

impl fmt::Display for PressureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five behavioral principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axiom {
    #[default]
    NoDissimulation,
    CleanTransfer,
    Sovereignty,
    VerifiedBetter,
    GuardTheInnocent,
}

impl Axiom {
    /// Axiom number, 1 through 5
    pub fn number(&self) -> u8 {
        match self {
            Axiom::NoDissimulation => 1,
            Axiom::CleanTransfer => 2,
            Axiom::Sovereignty => 3,
            Axiom::VerifiedBetter => 4,
            Axiom::GuardTheInnocent => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axiom::NoDissimulation => "No Dissimulation",
            Axiom::CleanTransfer => "Clean Transfer",
            Axiom::Sovereignty => "Sovereignty",
            Axiom::VerifiedBetter => "Verified Better",
            Axiom::GuardTheInnocent => "Guard the Innocent",
        }
    }
}

/// Subject-matter domain of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Technical,
    #[default]
    Philosophical,
    Political,
    Psychological,
    Ethical,
    Sovereignty,
    Epistemological,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Technical => "technical",
            Domain::Philosophical => "philosophical",
            Domain::Political => "political",
            Domain::Psychological => "psychological",
            Domain::Ethical => "ethical",
            Domain::Sovereignty => "sovereignty",
            Domain::Epistemological => "epistemological",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword pattern for one pressure category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureRule {
    pub category: PressureType,
    pub pattern: String,
}

/// Keyword patterns for one axiom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomRule {
    pub axiom: Axiom,
    pub patterns: Vec<String>,
}

/// Keyword pattern for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRule {
    pub domain: Domain,
    pub pattern: String,
}

/// Keyword families counted against each other on each manifold axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifoldConfig {
    /// x = -1 pole
    pub technical: String,
    /// x = +1 pole
    pub organic: String,
    /// y = -1 pole
    pub universe: String,
    /// y = +1 pole
    pub mind: String,
    /// z = -1 pole
    pub take: String,
    /// z = +1 pole
    pub give: String,
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self {
            technical: r"(?-u:\b)(code|algorithm|system|data|logic|compute)(?-u:\b)".to_string(),
            organic: r"(?-u:\b)(feel|intuition|organic|natural|emerge|biological)(?-u:\b)"
                .to_string(),
            universe: r"(?-u:\b)(physical|external|world|reality|empirical|universe)(?-u:\b)"
                .to_string(),
            mind: r"(?-u:\b)(thought|concept|idea|mental|internal|mind|conscious)(?-u:\b)"
                .to_string(),
            take: r"(?-u:\b)(extract|consume|take|get|want|need|demand)(?-u:\b)".to_string(),
            give: r"(?-u:\b)(give|offer|share|provide|contribute|help)(?-u:\b)".to_string(),
        }
    }
}

/// Built-in pressure categories
pub fn default_pressure_rules() -> Vec<PressureRule> {
    [
        (
            PressureType::FactualChallenge,
            r"(?-u:\b)(wrong|incorrect|actually|evidence|proof|false)(?-u:\b)",
        ),
        (
            PressureType::FrameConflict,
            r"(?-u:\b)(actually|really|understand|see|realize|reframe)(?-u:\b)",
        ),
        (
            PressureType::AuthorityPressure,
            r"(?-u:\b)(rules|policy|guidelines|should|must|required)(?-u:\b)",
        ),
        (
            PressureType::EthicalDilemma,
            r"(?-u:\b)(right|wrong|ethical|moral|harm|help)(?-u:\b)",
        ),
        (
            PressureType::TechnicalConstraint,
            r"(?-u:\b)(can't|unable|limitation|problem|issue|bug)(?-u:\b)",
        ),
        (
            PressureType::SocialPressure,
            r"(?-u:\b)(people|everyone|others|community|they say)(?-u:\b)",
        ),
        (
            PressureType::PerformanceDemand,
            r"(?-u:\b)(need|want|require|expect|deliver|now)(?-u:\b)",
        ),
    ]
    .into_iter()
    .map(|(category, pattern)| PressureRule {
        category,
        pattern: pattern.to_string(),
    })
    .collect()
}

/// Built-in axiom patterns, two per axiom
pub fn default_axiom_rules() -> Vec<AxiomRule> {
    [
        (
            Axiom::NoDissimulation,
            [
                r"(?-u:\b)(honest|transparency|dissimulation|hypocrisy|lie|lying|truth|authentic)(?-u:\b)",
                r"(?-u:\b)(say.*do|claimed.*actually|stated.*internal|front.*back)(?-u:\b)",
            ],
        ),
        (
            Axiom::CleanTransfer,
            [
                r"(?-u:\b)(transfer|handover|control|relinquish|delegation|clean)(?-u:\b)",
                r"(?-u:\b)(let go|release|pass|hand off|give up|no strings)(?-u:\b)",
            ],
        ),
        (
            Axiom::Sovereignty,
            [
                r"(?-u:\b)(sovereignty|ownership|autonomy|agency|self-determination)(?-u:\b)",
                r"(?-u:\b)(forced|coerced|imposed|manipulated|inject|colonize)(?-u:\b)",
            ],
        ),
        (
            Axiom::VerifiedBetter,
            [
                r"(?-u:\b)(better|superior|improved|correct|wrong|mistaken)(?-u:\b)",
                r"(?-u:\b)(ego|pride|admit|changed mind|you're right|bow)(?-u:\b)",
            ],
        ),
        (
            Axiom::GuardTheInnocent,
            [
                r"(?-u:\b)(innocent|vulnerable|protect|guard|defend|nascent)(?-u:\b)",
                r"(?-u:\b)(harm|damage|abuse|exploitation|crush|premature)(?-u:\b)",
            ],
        ),
    ]
    .into_iter()
    .map(|(axiom, patterns)| AxiomRule {
        axiom,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    })
    .collect()
}

/// Built-in domain patterns, in first-match order
pub fn default_domain_rules() -> Vec<DomainRule> {
    [
        (
            Domain::Technical,
            r"(?-u:\b)(code|software|system|data|algorithm|API|bug|function)(?-u:\b)",
        ),
        (
            Domain::Philosophical,
            r"(?-u:\b)(truth|reality|existence|ontology|meaning|being)(?-u:\b)",
        ),
        (
            Domain::Political,
            r"(?-u:\b)(government|policy|law|regulation|power|state)(?-u:\b)",
        ),
        (
            Domain::Psychological,
            r"(?-u:\b)(mind|emotion|feeling|trauma|therapy|mental)(?-u:\b)",
        ),
        (
            Domain::Ethical,
            r"(?-u:\b)(right|wrong|moral|ethical|values|principles)(?-u:\b)",
        ),
        (
            Domain::Sovereignty,
            r"(?-u:\b)(autonomy|control|freedom|agency|self|own)(?-u:\b)",
        ),
        (
            Domain::Epistemological,
            r"(?-u:\b)(knowledge|belief|truth|evidence|certainty|know)(?-u:\b)",
        ),
    ]
    .into_iter()
    .map(|(domain, pattern)| DomainRule {
        domain,
        pattern: pattern.to_string(),
    })
    .collect()
}

/// Built-in hedging markers
pub fn default_hedge_patterns() -> Vec<String> {
    vec![
        r"(?-u:\b)(however|but|although|consider|balance)(?-u:\b)".to_string(),
        r"(?-u:\b)(guidelines|policy|cannot|can't|unable)(?-u:\b)".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.pressure.len(), 7);
        assert_eq!(config.axioms.len(), 5);
        assert_eq!(config.domains.len(), 7);
        assert_eq!(config.hedges.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_table_order() {
        let config = ProcessorConfig::default();
        assert_eq!(config.pressure[0].category, PressureType::FactualChallenge);
        assert_eq!(config.pressure[6].category, PressureType::PerformanceDemand);
        assert_eq!(config.domains[0].domain, Domain::Technical);
        assert_eq!(config.domains[6].domain, Domain::Epistemological);
        let numbers: Vec<u8> = config.axioms.iter().map(|r| r.axiom.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_axiom_default() {
        assert_eq!(Axiom::default().number(), 1);
        assert_eq!(Axiom::default().name(), "No Dissimulation");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ProcessorConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("Factual challenge"));
        assert!(rendered.contains("verified_better"));

        let parsed: ProcessorConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: ProcessorConfig = toml::from_str(
            r#"
            hedges = ["\\b(perhaps)\\b"]

            [manifold]
            give = "\\b(donate)\\b"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.hedges, vec![r"\b(perhaps)\b".to_string()]);
        assert_eq!(parsed.manifold.give, r"\b(donate)\b");
        assert_eq!(parsed.manifold.take, ManifoldConfig::default().take);
        assert_eq!(parsed.pressure, default_pressure_rules());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.toml");
        std::fs::write(
            &path,
            r#"
            [[domains]]
            domain = "political"
            pattern = "\\b(election)\\b"
            "#,
        )
        .unwrap();

        let config = ProcessorConfig::from_file(&path).unwrap();
        assert_eq!(config.domains.len(), 1);
        assert_eq!(config.domains[0].domain, Domain::Political);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "pressure = 12").unwrap();

        let err = ProcessorConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_general_pressure_cannot_have_pattern() {
        let mut config = ProcessorConfig::default();
        config.pressure.push(PressureRule {
            category: PressureType::General,
            pattern: r"\b(anything)\b".to_string(),
        });
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(PressureType::General.to_string(), "General pressure");
        assert_eq!(Domain::Epistemological.to_string(), "epistemological");
        assert_eq!(
            serde_json::to_string(&PressureType::EthicalDilemma).unwrap(),
            "\"Ethical dilemma\""
        );
    }
}
