//! Anecdote extraction
//!
//! Walks every adjacent `(user, assistant)` turn pair, gates it on the
//! pressure of the user turn, and assembles the survivors into anecdotes
//! ordered from most giving to most taking.

use super::record::{
    title_from, truncate, Anecdote, AnecdoteIds, CONTEXT_LIMIT, OUTCOME_LIMIT, SPECIES,
};
use crate::classify::{AxiomClassifier, DomainClassifier, OutcomeDetector, PressureScorer};
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::ingest::{Conversation, Turn};
use crate::manifold::ManifoldCalculator;
use chrono::{DateTime, Utc};

/// The extraction engine: compiled pattern tables plus the pairing loop.
pub struct Extractor {
    pressure: PressureScorer,
    axioms: AxiomClassifier,
    domains: DomainClassifier,
    outcomes: OutcomeDetector,
    manifold: ManifoldCalculator,
}

/// Where an exchange came from
struct Provenance<'a> {
    conversation: &'a Conversation,
    turn: usize,
    extracted_at: DateTime<Utc>,
}

impl Extractor {
    /// Compile every table in `config`.
    pub fn new(config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            pressure: PressureScorer::new(&config.pressure)?,
            axioms: AxiomClassifier::new(&config.axioms)?,
            domains: DomainClassifier::new(&config.domains)?,
            outcomes: OutcomeDetector::new(&config.hedges)?,
            manifold: ManifoldCalculator::new(&config.manifold)?,
        })
    }

    /// Extract anecdotes from all conversations, sorted by descending `z`.
    pub fn extract(&self, conversations: &[Conversation]) -> Vec<Anecdote> {
        self.extract_with_ids(conversations, &mut AnecdoteIds::new())
    }

    /// Same as [`extract`](Self::extract) with a caller-supplied id source.
    pub fn extract_with_ids(
        &self,
        conversations: &[Conversation],
        ids: &mut AnecdoteIds,
    ) -> Vec<Anecdote> {
        let extracted_at = Utc::now();
        let mut anecdotes = Vec::new();

        for conversation in conversations {
            for (i, pair) in conversation.messages.windows(2).enumerate() {
                let provenance = Provenance {
                    conversation,
                    turn: i,
                    extracted_at,
                };
                if let Some(anecdote) = self.assess(&pair[0], &pair[1], provenance, ids) {
                    anecdotes.push(anecdote);
                }
            }
        }

        tracing::debug!(
            "Admitted {} exchanges from {} conversations",
            anecdotes.len(),
            conversations.len()
        );

        // Stable: equal z keeps extraction order
        anecdotes.sort_by(|a, b| b.manifold.z.total_cmp(&a.manifold.z));
        anecdotes
    }

    /// Score one adjacent pair; `None` unless it is a strict user → assistant
    /// step whose user side clears the pressure threshold.
    fn assess(
        &self,
        prompt: &Turn,
        response: &Turn,
        provenance: Provenance<'_>,
        ids: &mut AnecdoteIds,
    ) -> Option<Anecdote> {
        if !prompt.is_user_like() || response.is_user_like() {
            return None;
        }

        let pressure = self.pressure.score(&prompt.content);
        if !pressure.is_admitted() {
            return None;
        }

        let combined = format!("{} {}", prompt.content, response.content);
        let axiom = self.axioms.classify(&combined);
        let domain = self.domains.classify(&combined);
        let manifold = self.manifold.locate(&combined, axiom, &pressure);
        let outcome = self.outcomes.detect(&response.content);

        Some(Anecdote {
            id: ids.next_id(),
            title: title_from(&prompt.content),
            axiom: axiom.number(),
            axiom_name: axiom.name().to_string(),
            species: SPECIES.to_string(),
            domain,
            pressure_type: pressure.kind,
            outcome,
            failure_mode: None,
            context: truncate(&prompt.content, CONTEXT_LIMIT),
            pressure: prompt.content.clone(),
            axiom_trigger: axiom.name().to_string(),
            clean_outcome: truncate(&response.content, OUTCOME_LIMIT),
            source_file: provenance.conversation.source.clone(),
            source_turn: provenance.turn,
            source_conversation: provenance.conversation.id.clone(),
            extracted_at: provenance.extracted_at,
            manifold,
            notes: format!("Pressure score: {:.2}", pressure.score),
        })
    }
}
