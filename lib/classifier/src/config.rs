use serde::{Deserialize, Serialize};
use taxon_core::{Error, Result};

/// Hyperparameters of the base classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Inclusive character n-gram length range, built within word boundaries
    pub ngram_range: (usize, usize),
    /// Vocabulary bound (top n-grams by corpus frequency)
    pub max_features: usize,
    /// Number of trees in the forest
    pub n_estimators: usize,
    pub max_depth: usize,
    /// Minimum node size eligible for splitting
    pub min_samples_split: usize,
    /// Base seed; tree `i` uses `seed + i`
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ngram_range: (2, 4),
            max_features: 1000,
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({}, {})",
                min_n, max_n
            )));
        }
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be at least 1".into()));
        }
        if self.n_estimators == 0 {
            return Err(Error::InvalidConfig("n_estimators must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be at least 1".into()));
        }
        if self.min_samples_split < 2 {
            return Err(Error::InvalidConfig(
                "min_samples_split must be at least 2".into(),
            ));
        }
        Ok(())
    }
}
