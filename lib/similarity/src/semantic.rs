//! Taxonomy-driven semantic signal.
//!
//! Measures how much of the input text is covered by the vocabulary a
//! taxonomy entry declares for itself (tags, display label, property values).

use crate::explain::{Signal, SignalDiagnostic, SignalScore};
use crate::scorer::{SignalScorer, NEUTRAL_SCORE};
use ahash::{AHashMap, AHashSet};
use std::sync::Arc;
use taxon_core::{text, TaxonomyIndex};

#[derive(Debug, Clone)]
pub struct SemanticSimilarity {
    index: Arc<TaxonomyIndex>,
    /// Lowercased terms per taxonomy value, computed once
    terms: AHashMap<String, AHashSet<String>>,
}

impl SemanticSimilarity {
    pub fn new(index: Arc<TaxonomyIndex>) -> Self {
        let terms = index
            .entries()
            .iter()
            .map(|entry| (entry.value.clone(), entry.terms()))
            .collect();
        Self { index, terms }
    }

    pub fn index(&self) -> &Arc<TaxonomyIndex> {
        &self.index
    }
}

impl SignalScorer for SemanticSimilarity {
    fn signal(&self) -> Signal {
        Signal::Semantic
    }

    fn evaluate(&self, text: &str, label: &str) -> SignalScore {
        let Some(terms) = self.terms.get(label) else {
            tracing::debug!(label, "no taxonomy entry for label, semantic score neutral");
            return SignalScore::fallback(
                NEUTRAL_SCORE,
                SignalDiagnostic::TaxonomyEntryMissing {
                    label: label.to_string(),
                },
            );
        };

        let tokens = text::token_set(text);
        if tokens.is_empty() {
            return SignalScore::fallback(0.0, SignalDiagnostic::NoTextTokens);
        }

        let overlap = tokens.iter().filter(|t| terms.contains(*t)).count();
        SignalScore::computed(overlap as f64 / tokens.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_core::{Taxonomy, TaxonomyEntry, TaxonomyGroup};

    fn create_semantic() -> SemanticSimilarity {
        let taxonomy = Taxonomy::new(vec![TaxonomyGroup::new(
            "fields",
            vec![
                TaxonomyEntry::new("PK", "Primary Key").with_tags(["id", "key"]),
                TaxonomyEntry::new("PII", "Personal Info")
                    .with_tags(["Name", "email"])
                    .with_property("examples", "Phone Address"),
            ],
        )]);
        SemanticSimilarity::new(Arc::new(TaxonomyIndex::build(&taxonomy)))
    }

    #[test]
    fn test_containment_ratio() {
        let semantic = create_semantic();
        assert_eq!(semantic.score("user_id", "PK"), 0.5);
        assert_eq!(semantic.score("ID_KEY", "PK"), 1.0);
        assert_eq!(semantic.score("order_total", "PK"), 0.0);
    }

    #[test]
    fn test_tags_and_properties_are_case_insensitive() {
        let semantic = create_semantic();
        assert_eq!(semantic.score("customer_name", "PII"), 0.5);
        assert_eq!(semantic.score("home address", "PII"), 0.5);
        assert_eq!(semantic.score("PHONE", "PII"), 1.0);
    }

    #[test]
    fn test_missing_entry_is_neutral() {
        let semantic = create_semantic();
        let score = semantic.evaluate("customer_id", "FK");
        assert_eq!(score.value, 0.5);
        assert_eq!(
            score.diagnostic,
            Some(SignalDiagnostic::TaxonomyEntryMissing { label: "FK".into() })
        );
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let semantic = create_semantic();
        let score = semantic.evaluate("__", "PK");
        assert_eq!(score.value, 0.0);
        assert_eq!(score.diagnostic, Some(SignalDiagnostic::NoTextTokens));
    }
}
