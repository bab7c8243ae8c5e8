//! Explainability for fused predictions
//!
//! Every prediction carries the raw value of each signal, the weights used
//! to fuse them and any diagnostics explaining why a signal fell back to
//! its neutral default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The independent signals fused into a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    WordMatch,
    Pattern,
    Semantic,
    Embedding,
    Base,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::WordMatch,
        Signal::Pattern,
        Signal::Semantic,
        Signal::Embedding,
        Signal::Base,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::WordMatch => "word_match",
            Signal::Pattern => "pattern",
            Signal::Semantic => "semantic",
            Signal::Embedding => "embedding",
            Signal::Base => "base",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a signal returned a fallback value instead of a computed one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalDiagnostic {
    /// Predicted label has no taxonomy entry
    TaxonomyEntryMissing { label: String },
    /// Normalized text has no tokens
    NoTextTokens,
    /// None of the text tokens has an embedding
    NoTextVectors { tokens: usize },
    /// None of the label tokens has an embedding
    NoLabelVectors { tokens: usize },
    /// Averaged embedding has zero norm
    DegenerateVector,
}

impl SignalDiagnostic {
    /// Signal that emitted this diagnostic
    pub fn signal(&self) -> Signal {
        match self {
            SignalDiagnostic::TaxonomyEntryMissing { .. } | SignalDiagnostic::NoTextTokens => {
                Signal::Semantic
            }
            SignalDiagnostic::NoTextVectors { .. }
            | SignalDiagnostic::NoLabelVectors { .. }
            | SignalDiagnostic::DegenerateVector => Signal::Embedding,
        }
    }
}

/// Value of one signal plus an optional fallback diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct SignalScore {
    pub value: f64,
    pub diagnostic: Option<SignalDiagnostic>,
}

impl SignalScore {
    pub fn computed(value: f64) -> Self {
        Self {
            value,
            diagnostic: None,
        }
    }

    pub fn fallback(value: f64, diagnostic: SignalDiagnostic) -> Self {
        Self {
            value,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Per-prediction breakdown of every fused signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub word_match: f64,
    pub pattern_match: f64,
    pub semantic_match: f64,
    pub embedding_match: f64,
    pub base_probability: f64,
    /// Weights used for fusion keyed by signal name, summing to 1.0
    pub weights: BTreeMap<String, f64>,
    /// Weighted sum of the signals, in [0, 1]
    pub final_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<SignalDiagnostic>,
}

impl ScoreBreakdown {
    /// Raw value of a signal
    pub fn value(&self, signal: Signal) -> f64 {
        match signal {
            Signal::WordMatch => self.word_match,
            Signal::Pattern => self.pattern_match,
            Signal::Semantic => self.semantic_match,
            Signal::Embedding => self.embedding_match,
            Signal::Base => self.base_probability,
        }
    }

    /// Weighted contribution of each signal to `final_score`
    pub fn contributions(&self) -> BTreeMap<Signal, f64> {
        Signal::ALL
            .iter()
            .map(|&s| {
                let weight = self.weights.get(s.as_str()).copied().unwrap_or(0.0);
                (s, self.value(s) * weight)
            })
            .collect()
    }

    /// Signal with the largest weighted contribution (first in signal order on ties)
    pub fn top_contributor(&self) -> Option<Signal> {
        let mut best: Option<(Signal, f64)> = None;
        for (signal, contribution) in self.contributions() {
            if best.map_or(true, |(_, b)| contribution > b) {
                best = Some((signal, contribution));
            }
        }
        best.map(|(s, _)| s)
    }
}

/// A classified input with its calibrated confidence and full breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub input_text: String,
    pub predicted_label: String,
    pub confidence: f64,
    pub breakdown: ScoreBreakdown,
}

/// Summary statistics for a prediction batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionStats {
    /// Number of predictions
    pub count: usize,
    pub avg_confidence: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
    /// Predictions per label
    pub labels: BTreeMap<String, usize>,
    /// Signal that contributed most to the most confident prediction
    pub top_contributing_signal: Option<Signal>,
}

impl PredictionStats {
    pub fn compute(results: &[PredictionResult]) -> Self {
        if results.is_empty() {
            return Self {
                count: 0,
                avg_confidence: 0.0,
                min_confidence: 0.0,
                max_confidence: 0.0,
                labels: BTreeMap::new(),
                top_contributing_signal: None,
            };
        }

        let mut labels = BTreeMap::new();
        for r in results {
            *labels.entry(r.predicted_label.clone()).or_insert(0) += 1;
        }

        let confidences: Vec<f64> = results.iter().map(|r| r.confidence).collect();
        let avg_confidence = confidences.iter().sum::<f64>() / confidences.len() as f64;
        let min_confidence = confidences.iter().copied().fold(f64::INFINITY, f64::min);
        let max_confidence = confidences.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // First result wins among equally confident ones
        let mut best = &results[0];
        for r in &results[1..] {
            if r.confidence > best.confidence {
                best = r;
            }
        }

        Self {
            count: results.len(),
            avg_confidence,
            min_confidence,
            max_confidence,
            labels,
            top_contributing_signal: best.breakdown.top_contributor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(word: f64, semantic: f64) -> ScoreBreakdown {
        let weights: BTreeMap<String, f64> = [
            ("word_match", 0.45),
            ("pattern", 0.0),
            ("semantic", 0.45),
            ("embedding", 0.05),
            ("base", 0.05),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        ScoreBreakdown {
            word_match: word,
            pattern_match: 0.5,
            semantic_match: semantic,
            embedding_match: 0.5,
            base_probability: 0.8,
            weights,
            final_score: 0.45 * word + 0.45 * semantic + 0.025 + 0.04,
            diagnostics: Vec::new(),
        }
    }

    fn result(label: &str, confidence: f64, b: ScoreBreakdown) -> PredictionResult {
        PredictionResult {
            input_text: "x".into(),
            predicted_label: label.into(),
            confidence,
            breakdown: b,
        }
    }

    #[test]
    fn test_contributions() {
        let b = breakdown(0.6, 0.2);
        let c = b.contributions();
        assert!((c[&Signal::WordMatch] - 0.27).abs() < 1e-12);
        assert_eq!(c[&Signal::Pattern], 0.0);
        assert_eq!(b.top_contributor(), Some(Signal::WordMatch));

        let b = breakdown(0.2, 0.6);
        assert_eq!(b.top_contributor(), Some(Signal::Semantic));
    }

    #[test]
    fn test_diagnostic_serialization() {
        let json = serde_json::to_string(&SignalDiagnostic::TaxonomyEntryMissing {
            label: "PK".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"taxonomy_entry_missing","label":"PK"}"#);
        assert_eq!(SignalDiagnostic::DegenerateVector.signal(), Signal::Embedding);
        assert_eq!(SignalDiagnostic::NoTextTokens.signal(), Signal::Semantic);
    }

    #[test]
    fn test_breakdown_omits_empty_diagnostics() {
        let json = serde_json::to_value(breakdown(0.5, 0.5)).unwrap();
        assert!(json.get("diagnostics").is_none());
        assert!(json.get("final_score").is_some());
        assert_eq!(json["weights"]["semantic"], 0.45);
    }

    #[test]
    fn test_prediction_stats() {
        let results = vec![
            result("PK", 0.6, breakdown(0.6, 0.2)),
            result("PII", 0.9, breakdown(0.2, 0.9)),
            result("PK", 0.3, breakdown(0.1, 0.1)),
        ];

        let stats = PredictionStats::compute(&results);
        assert_eq!(stats.count, 3);
        assert!((stats.avg_confidence - 0.6).abs() < 1e-12);
        assert_eq!(stats.min_confidence, 0.3);
        assert_eq!(stats.max_confidence, 0.9);
        assert_eq!(stats.labels["PK"], 2);
        assert_eq!(stats.labels["PII"], 1);
        assert_eq!(stats.top_contributing_signal, Some(Signal::Semantic));
    }

    #[test]
    fn test_empty_stats() {
        let stats = PredictionStats::compute(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.labels.is_empty());
        assert_eq!(stats.top_contributing_signal, None);
    }
}
