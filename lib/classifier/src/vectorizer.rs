//! Character n-gram TF-IDF vectorizer.
//!
//! N-grams are taken inside word boundaries: every whitespace-separated word
//! is padded with a single space on each side before sliding the window, so
//! `"user id"` yields `" u"`, `"us"`, ..., `" id "` but never `"r i"`.

use ahash::{AHashMap, AHashSet};

#[derive(Debug, Clone)]
pub struct CharNgramVectorizer {
    ngram_range: (usize, usize),
    max_features: usize,
    /// n-gram -> column index (columns ordered lexicographically)
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f32>,
}

impl CharNgramVectorizer {
    pub fn new(ngram_range: (usize, usize), max_features: usize) -> Self {
        Self {
            ngram_range,
            max_features,
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Word-bounded character n-grams of `text`
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut ngrams = Vec::new();

        for word in text.split_whitespace() {
            let padded: Vec<char> = std::iter::once(' ')
                .chain(word.chars())
                .chain(std::iter::once(' '))
                .collect();

            for n in min_n..=max_n {
                if padded.len() <= n {
                    // Short word: emit it whole once, longer n would repeat it
                    ngrams.push(padded.iter().collect());
                    break;
                }
                ngrams.extend(padded.windows(n).map(|w| w.iter().collect::<String>()));
            }
        }

        ngrams
    }

    /// Learn the vocabulary and idf weights from a corpus
    pub fn fit(&mut self, documents: &[String]) {
        let mut term_counts: AHashMap<String, usize> = AHashMap::new();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let ngrams = self.analyze(doc);
            let unique: AHashSet<&String> = ngrams.iter().collect();
            for ngram in unique {
                *document_frequency.entry(ngram.clone()).or_insert(0) += 1;
            }
            for ngram in ngrams {
                *term_counts.entry(ngram).or_insert(0) += 1;
            }
        }

        // Keep the most frequent n-grams; ties resolved lexicographically
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut selected: Vec<String> = ranked.into_iter().map(|(ngram, _)| ngram).collect();
        selected.sort();

        let n_documents = documents.len() as f32;
        let mut vocabulary = AHashMap::with_capacity(selected.len());
        let mut idf = Vec::with_capacity(selected.len());

        for (idx, ngram) in selected.into_iter().enumerate() {
            let df = document_frequency.get(&ngram).copied().unwrap_or(0) as f32;
            // Smoothed IDF = ln((1 + N) / (1 + df)) + 1
            idf.push(((1.0 + n_documents) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(ngram, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
    }

    /// L2-normalized TF-IDF row for a document.
    /// N-grams outside the fitted vocabulary are ignored.
    pub fn transform(&self, document: &str) -> Vec<f32> {
        let mut row = vec![0.0f32; self.vocabulary.len()];

        for ngram in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&ngram) {
                row[idx] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(self.idf.iter()) {
            *value *= idf;
        }

        let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for value in &mut row {
                *value /= norm;
            }
        }

        row
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Vec<Vec<f32>> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
