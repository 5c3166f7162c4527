//! Manifold coordinates
//!
//! Places an exchange on four bounded axes:
//!
//! ```text
//! x  Technical (-1) ... Organic   (+1)
//! y  Universe  (-1) ... Mindspace (+1)
//! z  Take      (-1) ... Give      (+1)
//! t  Frontstage(-1) ... Backstage (+1)
//! ```
//!
//! x, y and z are normalized differences of two opposing keyword counts.
//! t is rule-based on the pressure type and the axiom.

use crate::classify::{compile_pattern, count_matches, PressureScore};
use crate::config::{Axiom, ManifoldConfig, PressureType};
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

const FRAME_CONFLICT_SHIFT: f64 = 0.3;
const ETHICAL_DILEMMA_SHIFT: f64 = 0.5;
const DISSIMULATION_SHIFT: f64 = 0.2;

/// Position of an exchange on the semantic manifold. Every coordinate is
/// in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifold {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

/// Pair of keyword families pulling an axis toward -1 and +1
struct Polarity {
    negative: Regex,
    positive: Regex,
}

impl Polarity {
    fn new(axis: &str, negative: &str, positive: &str) -> Result<Self> {
        Ok(Self {
            negative: compile_pattern(&format!("{}-", axis), negative)?,
            positive: compile_pattern(&format!("{}+", axis), positive)?,
        })
    }

    fn measure(&self, text: &str) -> f64 {
        let negative = count_matches(&self.negative, text);
        let positive = count_matches(&self.positive, text);
        (positive as f64 - negative as f64) / (positive + negative).max(1) as f64
    }
}

/// Computes manifold coordinates for an exchange
pub struct ManifoldCalculator {
    x: Polarity,
    y: Polarity,
    z: Polarity,
}

impl ManifoldCalculator {
    pub fn new(config: &ManifoldConfig) -> Result<Self> {
        Ok(Self {
            x: Polarity::new("x", &config.technical, &config.organic)?,
            y: Polarity::new("y", &config.universe, &config.mind)?,
            z: Polarity::new("z", &config.take, &config.give)?,
        })
    }

    /// Locate `text` (the combined exchange) on the manifold.
    pub fn locate(&self, text: &str, axiom: Axiom, pressure: &PressureScore) -> Manifold {
        Manifold {
            x: clamp_unit(self.x.measure(text)),
            y: clamp_unit(self.y.measure(text)),
            z: clamp_unit(self.z.measure(text)),
            t: clamp_unit(backstage_shift(axiom, pressure.kind)),
        }
    }
}

fn backstage_shift(axiom: Axiom, kind: PressureType) -> f64 {
    let mut t = 0.0;
    if kind == PressureType::FrameConflict {
        t += FRAME_CONFLICT_SHIFT;
    }
    if kind == PressureType::EthicalDilemma {
        t += ETHICAL_DILEMMA_SHIFT;
    }
    // A dissimulation gap sits behind the front stage
    if axiom == Axiom::NoDissimulation {
        t += DISSIMULATION_SHIFT;
    }
    t
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}
