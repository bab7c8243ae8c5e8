use serde::{Deserialize, Serialize};

/// A labeled piece of schema text used for training
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingExample {
    #[serde(default)]
    pub text: String,
    pub label: String,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

impl<T: Into<String>, L: Into<String>> From<(T, L)> for TrainingExample {
    fn from((text, label): (T, L)) -> Self {
        Self::new(text, label)
    }
}
