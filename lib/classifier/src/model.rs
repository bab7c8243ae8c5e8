use crate::config::ClassifierConfig;
use crate::encoder::LabelEncoder;
use crate::forest::{sqrt_features, RandomForest, TreeParams};
use crate::vectorizer::CharNgramVectorizer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taxon_core::{text, Error, Result, TrainingExample};

/// Label predicted by the base classifier with its forest-averaged probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProbability {
    pub label: String,
    pub probability: f64,
}

/// Fitted vectorizer, label encoding and forest.
/// Immutable once built; replaced wholesale by the next fit.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    vectorizer: CharNgramVectorizer,
    encoder: LabelEncoder,
    forest: RandomForest,
    config: ClassifierConfig,
}

impl TrainedModel {
    pub fn fit(examples: &[TrainingExample], config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let encoder = LabelEncoder::fit(examples.iter().map(|e| e.label.as_str()));
        if encoder.len() < 2 {
            return Err(Error::InsufficientData {
                distinct_labels: encoder.len(),
            });
        }

        let documents: Vec<String> = examples.iter().map(|e| text::normalize(&e.text)).collect();
        let labels: Vec<usize> = examples
            .iter()
            .map(|e| {
                encoder
                    .encode(&e.label)
                    .ok_or_else(|| Error::UnknownLabel(e.label.clone()))
            })
            .collect::<Result<_>>()?;

        let mut vectorizer = CharNgramVectorizer::new(config.ngram_range, config.max_features);
        let features = vectorizer.fit_transform(&documents);

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features: sqrt_features(vectorizer.vocabulary_size()),
        };
        let forest = RandomForest::fit(
            &features,
            &labels,
            encoder.len(),
            config.n_estimators,
            params,
            config.seed,
        );

        tracing::debug!(
            "Fitted base classifier: {} examples, {} labels, {} n-grams, {} trees",
            examples.len(),
            encoder.len(),
            vectorizer.vocabulary_size(),
            forest.n_trees()
        );

        Ok(Self {
            vectorizer,
            encoder,
            forest,
            config: config.clone(),
        })
    }

    /// Trained labels in encoding (sorted) order
    pub fn labels(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Class distribution for `text`, aligned with [`TrainedModel::labels`]
    pub fn predict_distribution(&self, text: &str) -> Vec<f64> {
        let row = self.vectorizer.transform(&text::normalize(text));
        self.forest
            .predict_proba(&row)
            .into_iter()
            .map(f64::from)
            .collect()
    }

    /// Most probable label; ties go to the lowest encoding index
    pub fn predict_one(&self, text: &str) -> LabelProbability {
        let distribution = self.predict_distribution(text);
        let (class, probability) = argmax(&distribution);
        let label = self.encoder.decode(class).unwrap_or_default().to_string();
        LabelProbability { label, probability }
    }
}

/// Index and value of the first maximum
pub(crate) fn argmax(values: &[f64]) -> (usize, f64) {
    let mut best = (0, values.first().copied().unwrap_or(0.0));
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}

/// Trainable base classifier.
///
/// Holds at most one [`TrainedModel`]; a failed `fit` keeps the previous one.
#[derive(Debug, Clone, Default)]
pub struct BaseClassifier {
    config: ClassifierConfig,
    model: Option<Arc<TrainedModel>>,
}

impl BaseClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    pub fn fit(&mut self, examples: &[TrainingExample]) -> Result<Arc<TrainedModel>> {
        let model = Arc::new(TrainedModel::fit(examples, &self.config)?);
        self.model = Some(Arc::clone(&model));
        Ok(model)
    }

    pub fn predict<S>(&self, texts: &[S]) -> Result<Vec<LabelProbability>>
    where
        S: AsRef<str> + Sync,
    {
        let model = self.model.as_ref().ok_or(Error::ModelNotTrained)?;
        Ok(texts
            .par_iter()
            .map(|t| model.predict_one(t.as_ref()))
            .collect())
    }

    pub fn predict_distribution(&self, text: &str) -> Result<Vec<f64>> {
        let model = self.model.as_ref().ok_or(Error::ModelNotTrained)?;
        Ok(model.predict_distribution(text))
    }

    pub fn model(&self) -> Option<&Arc<TrainedModel>> {
        self.model.as_ref()
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<TrainingExample> {
        vec![
            TrainingExample::new("customer_id", "PK"),
            TrainingExample::new("customer_name", "PII"),
            TrainingExample::new("order_id", "PK"),
            TrainingExample::new("email_address", "PII"),
        ]
    }

    #[test]
    fn test_predict_before_fit() {
        let classifier = BaseClassifier::default();
        assert!(!classifier.is_trained());
        assert!(matches!(
            classifier.predict(&["user_id"]),
            Err(Error::ModelNotTrained)
        ));
    }

    #[test]
    fn test_single_label_rejected() {
        let mut classifier = BaseClassifier::default();
        let result = classifier.fit(&[
            TrainingExample::new("customer_id", "PK"),
            TrainingExample::new("order_id", "PK"),
        ]);
        assert!(matches!(
            result,
            Err(Error::InsufficientData { distinct_labels: 1 })
        ));

        let result = classifier.fit(&[]);
        assert!(matches!(
            result,
            Err(Error::InsufficientData { distinct_labels: 0 })
        ));
        assert!(!classifier.is_trained());
    }

    #[test]
    fn test_predicts_trained_labels_only() {
        let mut classifier = BaseClassifier::default();
        let model = classifier.fit(&examples()).unwrap();
        assert_eq!(model.labels(), &["PII", "PK"]);

        let predictions = classifier
            .predict(&["user_id", "first_name", "", "zzzz"])
            .unwrap();
        assert_eq!(predictions.len(), 4);
        for p in &predictions {
            assert!(model.labels().contains(&p.label));
            assert!((0.0..=1.0).contains(&p.probability));
        }
        assert_eq!(predictions[0].label, "PK");
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let mut classifier = BaseClassifier::default();
        classifier.fit(&examples()).unwrap();

        let distribution = classifier.predict_distribution("product_id").unwrap();
        assert_eq!(distribution.len(), 2);
        assert!((distribution.iter().sum::<f64>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let mut a = BaseClassifier::default();
        let mut b = BaseClassifier::default();
        a.fit(&examples()).unwrap();
        b.fit(&examples()).unwrap();

        let texts = ["user_id", "billing_email", "product"];
        assert_eq!(a.predict(&texts).unwrap(), b.predict(&texts).unwrap());
    }

    #[test]
    fn test_failed_fit_keeps_previous_model() {
        let mut classifier = BaseClassifier::default();
        let first = classifier.fit(&examples()).unwrap();

        assert!(classifier
            .fit(&[TrainingExample::new("x", "PK")])
            .is_err());
        assert!(Arc::ptr_eq(classifier.model().unwrap(), &first));
    }

    #[test]
    fn test_argmax_prefers_lowest_index() {
        assert_eq!(argmax(&[0.5, 0.5]), (0, 0.5));
        assert_eq!(argmax(&[0.2, 0.3, 0.5]), (2, 0.5));
        assert_eq!(argmax(&[]), (0, 0.0));
    }
}
