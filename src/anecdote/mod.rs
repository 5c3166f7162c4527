//! Anecdote assembly
//!
//! ```text
//! Conversation ──► adjacent (user, assistant) pairs
//!                        │
//!                        ▼
//!                 PressureScorer ── score < 0.3 ──► dropped
//!                        │
//!                        ▼
//!   Axiom / Domain / Outcome / Manifold on the combined text
//!                        │
//!                        ▼
//!                 Anecdote (sorted by descending z)
//! ```

pub mod extractor;
pub mod record;

pub use extractor::Extractor;
pub use record::{truncate, Anecdote, AnecdoteIds};
