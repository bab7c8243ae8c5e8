use crate::explain::{Signal, SignalScore};

/// A similarity signal computed between input text and a candidate label.
///
/// Scorers are total: when a value cannot be computed they return a
/// neutral fallback with a diagnostic instead of an error.
pub trait SignalScorer: Send + Sync {
    fn signal(&self) -> Signal;

    fn evaluate(&self, text: &str, label: &str) -> SignalScore;

    /// Signal value in [0, 1]
    fn score(&self, text: &str, label: &str) -> f64 {
        self.evaluate(text, label).value
    }
}

/// Neutral default returned when a signal cannot be computed
pub const NEUTRAL_SCORE: f64 = 0.5;
