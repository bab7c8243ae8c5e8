//! Word-embedding signal.
//!
//! Both sides are tokenized, looked up in the embedding table and averaged;
//! the score is the cosine of the two averages clamped into [0, 1].

use crate::explain::{Signal, SignalDiagnostic, SignalScore};
use crate::scorer::{SignalScorer, NEUTRAL_SCORE};
use std::sync::Arc;
use taxon_core::{text, EmbeddingTable, Vector};

#[derive(Debug, Clone)]
pub struct EmbeddingSimilarity {
    table: Arc<EmbeddingTable>,
}

enum Average {
    Vector(Vector),
    NoVectors { tokens: usize },
}

impl EmbeddingSimilarity {
    pub fn new(table: Arc<EmbeddingTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<EmbeddingTable> {
        &self.table
    }

    fn average(&self, input: &str) -> Average {
        let tokens = text::tokens(input);
        match Vector::mean(tokens.iter().filter_map(|t| self.table.get(t))) {
            Some(v) => Average::Vector(v),
            None => Average::NoVectors {
                tokens: tokens.len(),
            },
        }
    }
}

impl SignalScorer for EmbeddingSimilarity {
    fn signal(&self) -> Signal {
        Signal::Embedding
    }

    fn evaluate(&self, text: &str, label: &str) -> SignalScore {
        let text_vector = match self.average(text) {
            Average::Vector(v) => v,
            Average::NoVectors { tokens } => {
                tracing::debug!(tokens, "no embeddings for text tokens, embedding score neutral");
                return SignalScore::fallback(
                    NEUTRAL_SCORE,
                    SignalDiagnostic::NoTextVectors { tokens },
                );
            }
        };

        let label_vector = match self.average(label) {
            Average::Vector(v) => v,
            Average::NoVectors { tokens } => {
                tracing::debug!(label, "no embeddings for label tokens, embedding score neutral");
                return SignalScore::fallback(
                    NEUTRAL_SCORE,
                    SignalDiagnostic::NoLabelVectors { tokens },
                );
            }
        };

        if text_vector.norm() == 0.0 || label_vector.norm() == 0.0 {
            return SignalScore::fallback(NEUTRAL_SCORE, SignalDiagnostic::DegenerateVector);
        }

        let cosine = f64::from(text_vector.cosine_similarity(&label_vector));
        SignalScore::computed(cosine.clamp(0.0, 1.0))
    }
}
