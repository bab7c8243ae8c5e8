//! # Taxon Engine
//!
//! Orchestrates training and prediction:
//!
//! - **train**: validate labels against the taxonomy, fit the base
//!   classifier, swap in the new model
//! - **predict**: classify each text, score the predicted label with every
//!   similarity signal and fuse the signals into a calibrated confidence
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use taxon_core::{EmbeddingTable, Taxonomy, TaxonomyEntry, TaxonomyGroup, TrainingExample};
//! use taxon_engine::{ClassificationEngine, EngineConfig};
//!
//! let taxonomy = Taxonomy::new(vec![TaxonomyGroup::new(
//!     "fields",
//!     vec![
//!         TaxonomyEntry::new("PK", "Primary Key").with_tags(["id", "key"]),
//!         TaxonomyEntry::new("PII", "Personal Info").with_tags(["name", "email"]),
//!     ],
//! )]);
//!
//! let engine = ClassificationEngine::new(EngineConfig::default(), Arc::new(EmbeddingTable::empty()))?;
//! engine.train(
//!     &[
//!         TrainingExample::new("customer_id", "PK"),
//!         TrainingExample::new("customer_name", "PII"),
//!     ],
//!     &taxonomy,
//! )?;
//!
//! let results = engine.predict(&["order_id"])?;
//! assert!((0.0..=1.0).contains(&results[0].confidence));
//! # Ok::<(), taxon_core::Error>(())
//! ```

pub mod config;
pub mod engine;

pub use config::{EngineConfig, ScoringMode};
pub use engine::{ClassificationEngine, TrainingReport};
