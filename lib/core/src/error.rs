use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Insufficient training data: need at least 2 distinct labels, got {distinct_labels}")]
    InsufficientData { distinct_labels: usize },

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Model not trained")]
    ModelNotTrained,

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid embedding table: {0}")]
    InvalidEmbedding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InsufficientData { distinct_labels: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient training data: need at least 2 distinct labels, got 1"
        );
        assert_eq!(Error::UnknownLabel("FK".into()).to_string(), "Unknown label: FK");
        assert_eq!(Error::ModelNotTrained.to_string(), "Model not trained");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<Vec<u32>, _> = serde_json::from_str("[1,");
        let err = Error::from(parse.unwrap_err());
        assert!(matches!(err, Error::Serialization(_)));
    }
}
