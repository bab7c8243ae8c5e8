//! JSON loaders for taxonomy, training examples and configuration files

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use taxon_core::{Result, Taxonomy, TrainingExample};

/// Deserialize any JSON document from a file
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path.as_ref())?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Load a taxonomy: a JSON array of `{group, options: [...]}`
pub fn load_taxonomy<P: AsRef<Path>>(path: P) -> Result<Taxonomy> {
    let taxonomy: Taxonomy = load_json(path.as_ref())?;
    tracing::debug!(
        "Loaded taxonomy from {:?}: {} groups, {} entries",
        path.as_ref(),
        taxonomy.groups().len(),
        taxonomy.entries().count()
    );
    Ok(taxonomy)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExamplesFile {
    List(Vec<TrainingExample>),
    Request { examples: Vec<TrainingExample> },
}

/// Load training examples, either a bare array of `{text, label}` or a
/// training request `{examples: [...]}`
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingExample>> {
    let examples = match load_json::<ExamplesFile, _>(path.as_ref())? {
        ExamplesFile::List(examples) => examples,
        ExamplesFile::Request { examples } => examples,
    };
    tracing::debug!("Loaded {} training examples from {:?}", examples.len(), path.as_ref());
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use taxon_core::Error;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_taxonomy() {
        let file = write_temp(
            r#"[
                {"group": "keys", "options": [
                    {"value": "PK", "label": "Primary Key", "tags": ["id", "key"],
                     "properties": {"kind": "identifier"},
                     "classification_description": "Uniquely identifies a row"}
                ]},
                {"group": "security", "options": [
                    {"value": "PII", "label": "Personal Info", "tags": ["name", "email"]}
                ]}
            ]"#,
        );

        let taxonomy = load_taxonomy(file.path()).unwrap();
        assert_eq!(taxonomy.groups().len(), 2);

        let pk = taxonomy.entries().next().unwrap();
        assert_eq!(pk.value, "PK");
        assert_eq!(pk.properties["kind"], "identifier");
        assert_eq!(pk.description.as_deref(), Some("Uniquely identifies a row"));
    }

    #[test]
    fn test_load_examples_both_shapes() {
        let list = write_temp(r#"[{"text": "customer_id", "label": "PK"}]"#);
        let request = write_temp(
            r#"{"examples": [{"text": "customer_id", "label": "PK"},
                             {"text": "email", "label": "PII"}]}"#,
        );

        assert_eq!(load_examples(list.path()).unwrap().len(), 1);
        let examples = load_examples(request.path()).unwrap();
        assert_eq!(examples[1], TrainingExample::new("email", "PII"));
    }

    #[test]
    fn test_malformed_and_missing_files() {
        let bad = write_temp("{not json");
        assert!(matches!(load_taxonomy(bad.path()), Err(Error::Serialization(_))));
        assert!(matches!(
            load_examples("/nonexistent/examples.json"),
            Err(Error::Io(_))
        ));
    }
}
