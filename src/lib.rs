//! # Taxon
//!
//! Classifies free-text schema artifacts (table and column names,
//! descriptions) into a controlled taxonomy and attaches an auditable
//! confidence score to every prediction.
//!
//! A character n-gram random forest proposes a label; lexical, pattern,
//! semantic and embedding signals then score that label independently and
//! are fused with configurable weights.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! taxon --taxonomy taxonomy.json --examples examples.json customer_id order_date
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use taxon::prelude::*;
//! use std::sync::Arc;
//!
//! let taxonomy = load_taxonomy("taxonomy.json")?;
//! let examples = load_examples("examples.json")?;
//! let embeddings = Arc::new(load_embeddings("glove.6B.50d.txt.gz")?);
//!
//! let engine = ClassificationEngine::new(EngineConfig::default(), embeddings)?;
//! engine.train(&examples, &taxonomy)?;
//!
//! for result in engine.predict(&["customer_email", "order_id"])? {
//!     println!("{} -> {} ({:.2})", result.input_text, result.predicted_label, result.confidence);
//! }
//! # Ok::<(), taxon::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - [`taxon-core`](https://docs.rs/taxon-core) - Taxonomy, text normalization, embedding tables, errors
//! - [`taxon-classifier`](https://docs.rs/taxon-classifier) - TF-IDF n-gram vectorizer and random forest
//! - [`taxon-similarity`](https://docs.rs/taxon-similarity) - Similarity signals and score fusion
//! - [`taxon-storage`](https://docs.rs/taxon-storage) - Loaders for taxonomy, examples and embeddings
//! - [`taxon-engine`](https://docs.rs/taxon-engine) - Training and prediction orchestration

// Re-export core types
pub use taxon_core::{
    EmbeddingTable, Error, Result, Taxonomy, TaxonomyEntry, TaxonomyGroup, TaxonomyIndex,
    TrainingExample, Vector,
};

pub use taxon_classifier::{BaseClassifier, ClassifierConfig, LabelProbability};

pub use taxon_similarity::{
    Calibration, FusionWeights, PredictionResult, PredictionStats, ScoreBreakdown, Signal,
    SignalDiagnostic,
};

pub use taxon_engine::{ClassificationEngine, EngineConfig, ScoringMode, TrainingReport};

pub use taxon_storage::{load_embeddings, load_examples, load_json, load_taxonomy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_embeddings, load_examples, load_json, load_taxonomy, Calibration, ClassificationEngine,
        EmbeddingTable, EngineConfig, Error, FusionWeights, PredictionResult, PredictionStats,
        Result, ScoringMode, Taxonomy, TaxonomyEntry, TaxonomyGroup, TrainingExample,
    };
}
