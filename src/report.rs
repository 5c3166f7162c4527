//! Aggregate statistics over extracted anecdotes

use crate::anecdote::Anecdote;
use std::fmt;

/// Anecdote counts by axiom name and by domain, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusStats {
    pub total: usize,
    pub by_axiom: Vec<(String, usize)>,
    pub by_domain: Vec<(String, usize)>,
}

impl CorpusStats {
    pub fn from_anecdotes(anecdotes: &[Anecdote]) -> Self {
        let mut stats = Self {
            total: anecdotes.len(),
            ..Default::default()
        };
        for anecdote in anecdotes {
            tally(&mut stats.by_axiom, &anecdote.axiom_name);
            tally(&mut stats.by_domain, anecdote.domain.as_str());
        }
        stats
    }
}

fn tally(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(name, _)| name == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== STATISTICS ===\n")?;
        writeln!(f, "Total anecdotes: {}", self.total)?;
        writeln!(f, "\nBy axiom:")?;
        for (name, count) in &self.by_axiom {
            writeln!(f, "  {}: {}", name, count)?;
        }
        writeln!(f, "\nBy domain:")?;
        for (name, count) in &self.by_domain {
            writeln!(f, "  {}: {}", name, count)?;
        }
        Ok(())
    }
}
