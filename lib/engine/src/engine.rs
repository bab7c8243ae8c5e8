//! Classification engine
//!
//! Training builds an immutable snapshot (fitted classifier, taxonomy
//! index, semantic scorer) off-lock and swaps it in under a short write
//! lock. Prediction clones the current snapshot's `Arc` and works without
//! holding any lock.

use crate::config::{EngineConfig, ScoringMode};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taxon_classifier::{BaseClassifier, LabelProbability};
use taxon_core::{EmbeddingTable, Error, Result, Taxonomy, TaxonomyIndex, TrainingExample};
use taxon_similarity::{
    EmbeddingSimilarity, LexicalSimilarity, PatternSimilarity, PredictionResult, ScoreBreakdown,
    ScoreFusion, SemanticSimilarity, Signal, SignalScorer, SignalSet,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Outcome of a successful training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    /// Trained labels in encoding order
    pub labels: Vec<String>,
    /// Number of training examples
    pub examples: usize,
    pub vocabulary_size: usize,
    pub n_estimators: usize,
}

/// Everything produced by one training run
struct Snapshot {
    report: TrainingReport,
    classifier: BaseClassifier,
    semantic: SemanticSimilarity,
}

pub struct ClassificationEngine {
    config: EngineConfig,
    fusion: ScoreFusion,
    lexical: LexicalSimilarity,
    pattern: PatternSimilarity,
    embedding: EmbeddingSimilarity,
    current: RwLock<Option<Arc<Snapshot>>>,
    /// Serializes concurrent `train` calls
    training: Mutex<()>,
}

impl ClassificationEngine {
    pub fn new(config: EngineConfig, embeddings: Arc<EmbeddingTable>) -> Result<Self> {
        config.validate()?;

        let fusion = ScoreFusion::new(config.weights, config.calibration)?;
        Ok(Self {
            fusion,
            lexical: LexicalSimilarity::new(),
            pattern: PatternSimilarity::new()?,
            embedding: EmbeddingSimilarity::new(embeddings),
            current: RwLock::new(None),
            training: Mutex::new(()),
            config,
        })
    }

    /// Train on `examples` labeled with values from `taxonomy`.
    ///
    /// Every label must exist in the taxonomy, otherwise the whole batch is
    /// rejected. On any error the previously trained model keeps serving.
    pub fn train(&self, examples: &[TrainingExample], taxonomy: &Taxonomy) -> Result<TrainingReport> {
        let _guard = self.training.lock();

        let index = TaxonomyIndex::build(taxonomy);
        if let Some(unknown) = examples.iter().find(|e| !index.contains(&e.label)) {
            return Err(Error::UnknownLabel(unknown.label.clone()));
        }

        let mut classifier = BaseClassifier::new(self.config.classifier.clone());
        let model = classifier.fit(examples)?;

        let report = TrainingReport {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            labels: model.labels().to_vec(),
            examples: examples.len(),
            vocabulary_size: model.vocabulary_size(),
            n_estimators: self.config.classifier.n_estimators,
        };

        let snapshot = Snapshot {
            report: report.clone(),
            classifier,
            semantic: SemanticSimilarity::new(Arc::new(index)),
        };
        *self.current.write() = Some(Arc::new(snapshot));

        info!(
            "Trained model {}: {} examples, {} labels, {} n-grams",
            report.model_id,
            report.examples,
            report.labels.len(),
            report.vocabulary_size
        );

        Ok(report)
    }

    /// Run [`ClassificationEngine::train`] on the blocking thread pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_training(
        self: &Arc<Self>,
        examples: Vec<TrainingExample>,
        taxonomy: Taxonomy,
    ) -> tokio::task::JoinHandle<Result<TrainingReport>> {
        let engine = Arc::clone(self);
        tokio::task::spawn_blocking(move || engine.train(&examples, &taxonomy))
    }

    /// Classify a batch of texts. Results keep input order.
    pub fn predict<S>(&self, texts: &[S]) -> Result<Vec<PredictionResult>>
    where
        S: AsRef<str> + Sync,
    {
        let snapshot = self.snapshot().ok_or(Error::ModelNotTrained)?;

        let results: Vec<PredictionResult> = match self.config.scoring_mode {
            ScoringMode::TopLabel => {
                let predictions = snapshot.classifier.predict(texts)?;
                texts
                    .par_iter()
                    .zip(predictions.into_par_iter())
                    .map(|(text, prediction)| {
                        self.score_top_label(&snapshot, text.as_ref(), prediction)
                    })
                    .collect()
            }
            ScoringMode::AllLabels => texts
                .par_iter()
                .map(|text| self.score_all_labels(&snapshot, text.as_ref()))
                .collect::<Result<Vec<_>>>()?,
        };

        debug!("Predicted {} texts with model {}", texts.len(), snapshot.report.model_id);
        Ok(results)
    }

    fn score_top_label(
        &self,
        snapshot: &Snapshot,
        text: &str,
        prediction: LabelProbability,
    ) -> PredictionResult {
        let breakdown = self.score_label(snapshot, text, &prediction.label, prediction.probability);
        self.result(text, prediction.label, breakdown)
    }

    fn score_all_labels(&self, snapshot: &Snapshot, text: &str) -> Result<PredictionResult> {
        let distribution = snapshot.classifier.predict_distribution(text)?;

        let mut best: Option<(&String, ScoreBreakdown)> = None;
        for (label, &probability) in snapshot.report.labels.iter().zip(distribution.iter()) {
            let breakdown = self.score_label(snapshot, text, label, probability);
            // Strict comparison keeps the lowest encoding index on ties
            if best
                .as_ref()
                .map_or(true, |(_, b)| breakdown.final_score > b.final_score)
            {
                best = Some((label, breakdown));
            }
        }

        let (label, breakdown) = best.ok_or(Error::ModelNotTrained)?;
        Ok(self.result(text, label.clone(), breakdown))
    }

    /// Evaluate every signal for (text, label) and fuse them
    fn score_label(&self, snapshot: &Snapshot, text: &str, label: &str, base: f64) -> ScoreBreakdown {
        let scorers: [&dyn SignalScorer; 4] = [
            &self.lexical,
            &self.pattern,
            &snapshot.semantic,
            &self.embedding,
        ];

        let mut signals = SignalSet::default();
        signals.set(Signal::Base, base.clamp(0.0, 1.0));
        for scorer in scorers {
            let score = scorer.evaluate(text, label);
            signals.set(scorer.signal(), score.value);
            if let Some(diagnostic) = score.diagnostic {
                signals.diagnostics.push(diagnostic);
            }
        }

        self.fusion.combine(&signals)
    }

    fn result(&self, text: &str, label: String, breakdown: ScoreBreakdown) -> PredictionResult {
        PredictionResult {
            input_text: text.to_string(),
            predicted_label: label,
            confidence: self.fusion.confidence(&breakdown),
            breakdown,
        }
    }

    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    pub fn is_trained(&self) -> bool {
        self.current.read().is_some()
    }

    /// Labels of the current model, empty when untrained
    pub fn labels(&self) -> Vec<String> {
        self.snapshot()
            .map(|s| s.report.labels.clone())
            .unwrap_or_default()
    }

    pub fn model_id(&self) -> Option<Uuid> {
        self.snapshot().map(|s| s.report.model_id)
    }

    /// Report of the training run behind the current model
    pub fn report(&self) -> Option<TrainingReport> {
        self.snapshot().map(|s| s.report.clone())
    }

    /// Taxonomy index of the current model
    pub fn taxonomy(&self) -> Option<Arc<TaxonomyIndex>> {
        self.snapshot().map(|s| Arc::clone(s.semantic.index()))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
