//! Corpus Processor - Extracts load-bearing anecdotes from conversation archives
//!
//! Reads conversation exports in several loosely structured formats, finds
//! exchanges where a user pushes (challenges, conflicts, demands) and an
//! assistant answers, and emits a scored record for each one, placed on a
//! four-dimensional semantic manifold.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Conversation Normalizer                    │
//! │   .json (tree export / message lists) · .jsonl · .txt / .md   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Vec<Conversation>
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │                        Extractor                              │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐   │
//! │  │ PressureScorer │  │AxiomClassifier │  │DomainClassifier│   │
//! │  └────────────────┘  └────────────────┘  └────────────────┘   │
//! │  ┌────────────────┐  ┌──────────────────┐                     │
//! │  │OutcomeDetector │  │ManifoldCalculator│                     │
//! │  └────────────────┘  └──────────────────┘                     │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Vec<Anecdote>, sorted by z
//!                                ▼
//!                   JSON array  ·  statistics report
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: Archive format detection and conversation normalization
//! - [`classify`]: Pressure, axiom, domain and outcome classification
//! - [`manifold`]: Manifold coordinate calculation
//! - [`anecdote`]: Turn pairing and anecdote assembly
//! - [`report`]: Aggregate statistics
//! - [`config`]: Keyword tables and configuration loading

pub mod anecdote;
pub mod classify;
pub mod config;
pub mod error;
pub mod ingest;
pub mod manifold;
pub mod report;

pub use anecdote::{Anecdote, Extractor};
pub use config::ProcessorConfig;
pub use error::{Error, Result};
pub use ingest::{normalize, Conversation, Turn};
pub use report::CorpusStats;
