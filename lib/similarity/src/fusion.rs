//! Weighted fusion of similarity signals
//!
//! The final score is a convex combination of the signal values:
//! `final = Σ value × weight` with non-negative weights summing to 1.0,
//! so for signals in [0, 1] the result is in [0, 1] too.

use crate::explain::{ScoreBreakdown, Signal, SignalDiagnostic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use taxon_core::{Error, Result};

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Per-signal fusion weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub word_match: f64,
    pub pattern: f64,
    pub semantic: f64,
    pub embedding: f64,
    pub base: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            word_match: 0.45,
            pattern: 0.0,
            semantic: 0.45,
            embedding: 0.05,
            base: 0.05,
        }
    }
}

impl FusionWeights {
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::WordMatch => self.word_match,
            Signal::Pattern => self.pattern,
            Signal::Semantic => self.semantic,
            Signal::Embedding => self.embedding,
            Signal::Base => self.base,
        }
    }

    pub fn sum(&self) -> f64 {
        Signal::ALL.iter().map(|&s| self.get(s)).sum()
    }

    /// Check every weight is finite and non-negative and the total is 1.0
    pub fn validate(&self) -> Result<()> {
        for signal in Signal::ALL {
            let weight = self.get(signal);
            if !weight.is_finite() {
                return Err(Error::InvalidWeights(format!(
                    "weight for '{}' is not finite",
                    signal
                )));
            }
            if weight < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "weight for '{}' is negative: {}",
                    signal, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::InvalidWeights(format!(
                "weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }

    /// Rescale a raw weight set so it sums to 1.0
    pub fn normalized(raw: FusionWeights) -> Result<Self> {
        for signal in Signal::ALL {
            let weight = raw.get(signal);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "weight for '{}' must be finite and non-negative, got {}",
                    signal, weight
                )));
            }
        }

        let sum = raw.sum();
        if sum <= 0.0 {
            return Err(Error::InvalidWeights("total weight must be positive".into()));
        }

        Ok(Self {
            word_match: raw.word_match / sum,
            pattern: raw.pattern / sum,
            semantic: raw.semantic / sum,
            embedding: raw.embedding / sum,
            base: raw.base / sum,
        })
    }

    /// Weights keyed by signal name
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        Signal::ALL
            .iter()
            .map(|&s| (s.as_str().to_string(), self.get(s)))
            .collect()
    }
}

/// Signal values for one (text, label) pair, each in [0, 1]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSet {
    pub word_match: f64,
    pub pattern: f64,
    pub semantic: f64,
    pub embedding: f64,
    pub base: f64,
    pub diagnostics: Vec<SignalDiagnostic>,
}

impl SignalSet {
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::WordMatch => self.word_match,
            Signal::Pattern => self.pattern,
            Signal::Semantic => self.semantic,
            Signal::Embedding => self.embedding,
            Signal::Base => self.base,
        }
    }

    pub fn set(&mut self, signal: Signal, value: f64) {
        match signal {
            Signal::WordMatch => self.word_match = value,
            Signal::Pattern => self.pattern = value,
            Signal::Semantic => self.semantic = value,
            Signal::Embedding => self.embedding = value,
            Signal::Base => self.base = value,
        }
    }
}

/// Mapping from fused score to reported confidence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Calibration {
    /// confidence = final_score
    #[default]
    Identity,
    /// confidence = floor + (1 - floor) * final_score
    Floor { floor: f64 },
}

impl Calibration {
    pub fn validate(&self) -> Result<()> {
        match self {
            Calibration::Identity => Ok(()),
            Calibration::Floor { floor } if floor.is_finite() && (0.0..=1.0).contains(floor) => {
                Ok(())
            }
            Calibration::Floor { floor } => Err(Error::InvalidConfig(format!(
                "calibration floor must be in [0, 1], got {}",
                floor
            ))),
        }
    }

    pub fn apply(&self, final_score: f64) -> f64 {
        match self {
            Calibration::Identity => final_score,
            Calibration::Floor { floor } => floor + (1.0 - floor) * final_score,
        }
    }
}

/// Weighted sum of a signal set.
///
/// Fails only when `weights` is invalid.
pub fn combine(signals: &SignalSet, weights: &FusionWeights) -> Result<ScoreBreakdown> {
    weights.validate()?;
    Ok(combine_unchecked(signals, weights))
}

fn combine_unchecked(signals: &SignalSet, weights: &FusionWeights) -> ScoreBreakdown {
    let final_score: f64 = Signal::ALL
        .iter()
        .map(|&s| signals.get(s) * weights.get(s))
        .sum();

    ScoreBreakdown {
        word_match: signals.word_match,
        pattern_match: signals.pattern,
        semantic_match: signals.semantic,
        embedding_match: signals.embedding,
        base_probability: signals.base,
        weights: weights.to_map(),
        final_score: final_score.clamp(0.0, 1.0),
        diagnostics: signals.diagnostics.clone(),
    }
}

/// Fusion with validated weights and a calibration
#[derive(Debug, Clone)]
pub struct ScoreFusion {
    weights: FusionWeights,
    calibration: Calibration,
}

impl ScoreFusion {
    pub fn new(weights: FusionWeights, calibration: Calibration) -> Result<Self> {
        weights.validate()?;
        calibration.validate()?;
        Ok(Self {
            weights,
            calibration,
        })
    }

    pub fn combine(&self, signals: &SignalSet) -> ScoreBreakdown {
        combine_unchecked(signals, &self.weights)
    }

    /// Reported confidence for a breakdown
    pub fn confidence(&self, breakdown: &ScoreBreakdown) -> f64 {
        self.calibration.apply(breakdown.final_score)
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }
}
