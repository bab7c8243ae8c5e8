//! # Taxon Core
//!
//! Core library for the Taxon schema-classification engine.
//!
//! This crate provides the shared data structures:
//!
//! - [`Taxonomy`] / [`TaxonomyIndex`] - Controlled label taxonomy and value lookup
//! - [`TrainingExample`] - Labeled schema text
//! - [`text`] - Normalization of table/column identifiers
//! - [`Vector`] / [`EmbeddingTable`] - Pretrained word embeddings
//! - [`Error`] - Errors shared by every Taxon crate
//!
//! ## Example
//!
//! ```rust
//! use taxon_core::{Taxonomy, TaxonomyGroup, TaxonomyEntry, TaxonomyIndex};
//!
//! let taxonomy = Taxonomy::new(vec![TaxonomyGroup::new(
//!     "keys",
//!     vec![TaxonomyEntry::new("PK", "Primary Key").with_tags(["id", "key"])],
//! )]);
//!
//! let index = TaxonomyIndex::build(&taxonomy);
//! assert_eq!(index.lookup("PK").unwrap().label, "Primary Key");
//! assert_eq!(taxon_core::text::normalize("CUSTOMER_ID"), "customer id");
//! ```

pub mod embedding;
pub mod error;
pub mod example;
pub mod taxonomy;
pub mod text;
pub mod vector;

pub use embedding::EmbeddingTable;
pub use error::{Error, Result};
pub use example::TrainingExample;
pub use taxonomy::{Taxonomy, TaxonomyEntry, TaxonomyGroup, TaxonomyIndex};
pub use vector::Vector;
