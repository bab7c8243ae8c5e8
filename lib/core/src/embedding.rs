//! Pretrained word embedding table
//!
//! A fixed token -> vector lookup, loaded once before the engine starts and
//! shared read-only afterwards. Tokens are stored lowercased so they line up
//! with normalized text.

use crate::{Error, Result, Vector};
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    dim: usize,
    vectors: AHashMap<String, Vector>,
}

impl EmbeddingTable {
    /// An empty table; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from (token, vector) pairs, rejecting mixed dimensions
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vector)>,
        S: Into<String>,
    {
        let mut table = Self::empty();
        for (token, vector) in entries {
            table.insert(token, vector)?;
        }
        Ok(table)
    }

    /// Insert a vector. The first insert fixes the table dimension.
    pub fn insert(&mut self, token: impl Into<String>, vector: Vector) -> Result<()> {
        let token = token.into().to_lowercase();

        if vector.is_empty() {
            return Err(Error::InvalidEmbedding(format!(
                "empty vector for token '{}'",
                token
            )));
        }

        if self.vectors.is_empty() {
            self.dim = vector.dim();
        } else if vector.dim() != self.dim {
            return Err(Error::InvalidEmbedding(format!(
                "token '{}' has dimension {}, expected {}",
                token,
                vector.dim(),
                self.dim
            )));
        }

        self.vectors.insert(token, vector);
        Ok(())
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<&Vector> {
        self.vectors.get(token)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.vectors.contains_key(token)
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let table = EmbeddingTable::from_entries([
            ("ID", Vector::new(vec![1.0, 0.0])),
            ("key", Vector::new(vec![0.9, 0.1])),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dim(), 2);
        assert!(table.contains("id"));
        assert!(table.get("ID").is_none());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = EmbeddingTable::from_entries([
            ("a", Vector::new(vec![1.0, 0.0])),
            ("b", Vector::new(vec![1.0, 0.0, 0.0])),
        ]);
        assert!(matches!(result, Err(Error::InvalidEmbedding(_))));
    }

    #[test]
    fn test_empty_vector_rejected() {
        let mut table = EmbeddingTable::empty();
        assert!(table.insert("a", Vector::new(vec![])).is_err());
        assert!(table.is_empty());
    }
}
