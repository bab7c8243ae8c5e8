//! Startup-time loaders.
//!
//! Everything here runs once before the engine is built; the engine itself
//! never touches the filesystem.

pub mod embeddings;
pub mod loader;

pub use embeddings::{load_embeddings, parse_embeddings, parse_json_embeddings};
pub use loader::{load_examples, load_json, load_taxonomy};
