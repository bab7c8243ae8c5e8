use serde::{Deserialize, Serialize};
use taxon_classifier::ClassifierConfig;
use taxon_core::Result;
use taxon_similarity::{Calibration, FusionWeights};

/// Which labels are scored per input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Only the classifier's most probable label
    #[default]
    TopLabel,
    /// Every trained label; the best fused score wins
    AllLabels,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub weights: FusionWeights,
    pub calibration: Calibration,
    pub scoring_mode: ScoringMode,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.weights.validate()?;
        self.calibration.validate()
    }
}
