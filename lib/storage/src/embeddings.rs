//! Embedding table loader
//!
//! Supported formats:
//! - GloVe text: one `token v1 v2 ... vd` per line
//! - the same, gzip-compressed (`.gz`)
//! - JSON object `{"token": [v1, ..., vd]}` (`.json`, optionally `.json.gz`)
//!
//! Inconsistent dimensions and unparsable values fail the whole load.

use flate2::read::GzDecoder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use taxon_core::{EmbeddingTable, Error, Result, Vector};

pub fn load_embeddings<P: AsRef<Path>>(path: P) -> Result<EmbeddingTable> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let compressed = name.ends_with(".gz");
    let json = name.trim_end_matches(".gz").ends_with(".json");

    let reader: Box<dyn Read> = if compressed {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(file)
    };
    let reader = BufReader::new(reader);

    let table = if json {
        parse_json_embeddings(reader)?
    } else {
        parse_embeddings(reader)?
    };

    tracing::info!(
        "Loaded {} embeddings (dim {}) from {:?}",
        table.len(),
        table.dim(),
        path
    );
    Ok(table)
}

/// Parse GloVe-style text.
///
/// Blank lines are skipped, as is a leading word2vec `<count> <dim>` header.
pub fn parse_embeddings<R: BufRead>(reader: R) -> Result<EmbeddingTable> {
    let mut table = EmbeddingTable::empty();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();

        let Some(token) = fields.next() else {
            continue;
        };
        let values: Vec<&str> = fields.collect();

        if idx == 0 && is_word2vec_header(token, &values) {
            tracing::warn!("Skipping word2vec header on line 1: {:?}", line);
            continue;
        }

        if values.is_empty() {
            return Err(Error::InvalidEmbedding(format!(
                "line {}: token '{}' has no vector",
                line_no, token
            )));
        }

        let vector = values
            .iter()
            .map(|v| {
                v.parse::<f32>().map_err(|_| {
                    Error::InvalidEmbedding(format!(
                        "line {}: cannot parse '{}' as a float",
                        line_no, v
                    ))
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        table
            .insert(token, Vector::new(vector))
            .map_err(|e| Error::InvalidEmbedding(format!("line {}: {}", line_no, e)))?;
    }

    Ok(table)
}

fn is_word2vec_header(token: &str, values: &[&str]) -> bool {
    values.len() == 1 && token.parse::<usize>().is_ok() && values[0].parse::<usize>().is_ok()
}

/// Parse a JSON object of token -> vector
pub fn parse_json_embeddings<R: Read>(reader: R) -> Result<EmbeddingTable> {
    let raw: BTreeMap<String, Vec<f32>> = serde_json::from_reader(reader)?;
    EmbeddingTable::from_entries(raw.into_iter().map(|(token, v)| (token, Vector::new(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    const GLOVE: &str = "customer 0.1 0.2 0.3\nid 0.0 1.0 0.0\n\nKey 0.5 0.5 0.0\n";

    #[test]
    fn test_parse_glove_text() {
        let table = parse_embeddings(GLOVE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.dim(), 3);
        assert_eq!(table.get("id").unwrap().as_slice(), &[0.0, 1.0, 0.0]);
        assert!(table.contains("key"));
    }

    #[test]
    fn test_word2vec_header_skipped() {
        let table = parse_embeddings("2 2\na 1.0 0.0\nb 0.0 1.0\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dim(), 2);
    }

    #[test]
    fn test_malformed_text_rejected() {
        let mixed = parse_embeddings("a 1.0 0.0\nb 1.0\n".as_bytes());
        assert!(matches!(mixed, Err(Error::InvalidEmbedding(_))));

        let bad_float = parse_embeddings("a 1.0 zero\n".as_bytes());
        assert!(matches!(bad_float, Err(Error::InvalidEmbedding(_))));

        let no_vector = parse_embeddings("lonely\n".as_bytes());
        assert!(matches!(no_vector, Err(Error::InvalidEmbedding(_))));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = TempDir::new().unwrap();

        let txt = dir.path().join("glove.txt");
        std::fs::write(&txt, GLOVE).unwrap();
        assert_eq!(load_embeddings(&txt).unwrap().len(), 3);

        let gz = dir.path().join("glove.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(GLOVE.as_bytes()).unwrap();
        encoder.finish().unwrap();
        assert_eq!(load_embeddings(&gz).unwrap().len(), 3);

        let json = dir.path().join("vectors.json");
        std::fs::write(&json, r#"{"pk": [0.0, 1.0], "id": [0.0, 0.9]}"#).unwrap();
        let table = load_embeddings(&json).unwrap();
        assert_eq!(table.dim(), 2);
        assert!(table.contains("pk"));

        assert!(matches!(
            load_embeddings(dir.path().join("missing.txt")),
            Err(Error::Io(_))
        ));
    }
}
