//! Naming-convention signal.
//!
//! Identifiers that follow a `<name>_TABLE` / `<name>_COLUMN` style suffix
//! convention score high regardless of the candidate label.

use crate::explain::{Signal, SignalScore};
use crate::scorer::{SignalScorer, NEUTRAL_SCORE};
use regex::Regex;
use taxon_core::{Error, Result};

/// Score for text matching a known naming convention
pub const PATTERN_MATCH_SCORE: f64 = 0.9;

const CONVENTIONS: [&str; 2] = [r"^.*_(TABLE|ENTITY|NAME)", r"^.*_(COLUMN|FIELD|ATTR)"];

#[derive(Debug, Clone)]
pub struct PatternSimilarity {
    patterns: Vec<Regex>,
}

impl PatternSimilarity {
    pub fn new() -> Result<Self> {
        let patterns = CONVENTIONS
            .iter()
            .map(|p| Regex::new(p).map_err(|e| Error::InvalidConfig(e.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether the raw, upper-cased text follows a naming convention
    pub fn matches(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.patterns.iter().any(|p| p.is_match(&upper))
    }
}

impl SignalScorer for PatternSimilarity {
    fn signal(&self) -> Signal {
        Signal::Pattern
    }

    fn evaluate(&self, text: &str, _label: &str) -> SignalScore {
        if self.matches(text) {
            SignalScore::computed(PATTERN_MATCH_SCORE)
        } else {
            SignalScore::computed(NEUTRAL_SCORE)
        }
    }
}
