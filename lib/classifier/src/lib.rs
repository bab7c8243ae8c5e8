//! # Taxon Classifier
//!
//! The trainable base classifier behind the Taxon engine.
//!
//! Text is normalized, split into word-bounded character n-grams and
//! weighted with TF-IDF; a seeded random forest of Gini trees then produces
//! a probability distribution over the trained labels.
//!
//! ```rust
//! use taxon_classifier::{BaseClassifier, ClassifierConfig};
//! use taxon_core::TrainingExample;
//!
//! let mut classifier = BaseClassifier::new(ClassifierConfig {
//!     n_estimators: 10,
//!     ..Default::default()
//! });
//! classifier
//!     .fit(&[
//!         TrainingExample::new("customer_id", "PK"),
//!         TrainingExample::new("customer_name", "PII"),
//!     ])
//!     .unwrap();
//!
//! let predictions = classifier.predict(&["order_id"]).unwrap();
//! assert!(["PK", "PII"].contains(&predictions[0].label.as_str()));
//! ```

pub mod config;
pub mod encoder;
pub mod forest;
pub mod model;
pub mod vectorizer;

pub use config::ClassifierConfig;
pub use encoder::LabelEncoder;
pub use forest::{DecisionTree, RandomForest, TreeParams};
pub use model::{BaseClassifier, LabelProbability, TrainedModel};
pub use vectorizer::CharNgramVectorizer;
