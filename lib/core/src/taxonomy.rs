//! Taxonomy definitions and lookup index
//!
//! A taxonomy is an ordered list of groups, each an ordered list of entries.
//! Entries are identified by `value`; the display `label`, `tags` and
//! `properties` feed semantic scoring.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single classification label with its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxonomyEntry {
    /// Unique identifier of the label
    pub value: String,
    /// Human readable display name
    pub label: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Optional structured attributes (free-text values)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(
        default,
        alias = "classification_description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl TaxonomyEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            tags: BTreeSet::new(),
            properties: BTreeMap::new(),
            description: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lowercased term set used for semantic matching:
    /// tags, the display label as a whole, and every whitespace token
    /// of every property value.
    pub fn terms(&self) -> AHashSet<String> {
        let mut terms: AHashSet<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
        terms.insert(self.label.to_lowercase());
        for value in self.properties.values() {
            terms.extend(value.split_whitespace().map(str::to_lowercase));
        }
        terms
    }
}

/// A named, ordered group of related entries (e.g. "security")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxonomyGroup {
    pub group: String,
    #[serde(default, alias = "entries")]
    pub options: Vec<TaxonomyEntry>,
}

impl TaxonomyGroup {
    pub fn new(group: impl Into<String>, options: Vec<TaxonomyEntry>) -> Self {
        Self {
            group: group.into(),
            options,
        }
    }
}

/// Ordered sequence of groups as supplied by configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Taxonomy {
    groups: Vec<TaxonomyGroup>,
}

impl Taxonomy {
    pub fn new(groups: Vec<TaxonomyGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TaxonomyGroup] {
        &self.groups
    }

    /// All entries, groups scanned in order
    pub fn entries(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.groups.iter().flat_map(|g| g.options.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.options.is_empty())
    }
}

/// Read-only value -> entry index built once from a taxonomy.
///
/// Groups are scanned in order and the first entry with a given value wins.
/// Later duplicates are recorded and logged, not rejected.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    entries: Vec<TaxonomyEntry>,
    by_value: AHashMap<String, usize>,
    duplicates: Vec<String>,
}

impl TaxonomyIndex {
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let mut index = Self::default();

        for group in taxonomy.groups() {
            for entry in &group.options {
                if index.by_value.contains_key(&entry.value) {
                    tracing::warn!(
                        value = %entry.value,
                        group = %group.group,
                        "duplicate taxonomy value, keeping first occurrence"
                    );
                    index.duplicates.push(entry.value.clone());
                    continue;
                }
                index.by_value.insert(entry.value.clone(), index.entries.len());
                index.entries.push(entry.clone());
            }
        }

        index
    }

    #[inline]
    pub fn lookup(&self, value: &str) -> Option<&TaxonomyEntry> {
        self.by_value.get(value).map(|&idx| &self.entries[idx])
    }

    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.by_value.contains_key(value)
    }

    /// Entry values in taxonomy order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    /// Values that appeared more than once (shadowed occurrences)
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
