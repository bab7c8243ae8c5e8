use ahash::AHashMap;
use std::collections::BTreeSet;

/// Label string <-> class index mapping.
///
/// Classes are encoded in sorted order, so index order is stable for a
/// given label set regardless of the order examples arrive in.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: AHashMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        Self { classes, index }
    }

    #[inline]
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[inline]
    pub fn decode(&self, class: usize) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_encoding() {
        let encoder = LabelEncoder::fit(["PK", "PII", "PK", "FK"]);

        assert_eq!(encoder.classes(), &["FK", "PII", "PK"]);
        assert_eq!(encoder.encode("FK"), Some(0));
        assert_eq!(encoder.encode("PK"), Some(2));
        assert_eq!(encoder.encode("XX"), None);
        assert_eq!(encoder.decode(1), Some("PII"));
        assert_eq!(encoder.decode(3), None);
    }
}
