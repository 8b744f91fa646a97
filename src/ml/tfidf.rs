//! TF-IDF text vectorizer over word unigrams and n-grams.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sparse feature vector: `(column, value)` pairs sorted by column.
pub type SparseVector = Vec<(usize, f64)>;

/// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

/// Fitted vocabulary and inverse document frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Longest n-gram (1 = unigrams only).
    pub ngram_max: usize,
    /// Term → column.
    pub vocabulary: BTreeMap<String, usize>,
    /// Smoothed IDF per column.
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF from `docs`.
    ///
    /// Columns are assigned in lexicographic term order. IDF is
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(docs: &[S], ngram_max: usize) -> Self {
        let ngram_max = ngram_max.max(1);
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in docs {
            let distinct: BTreeSet<String> = terms(doc.as_ref(), ngram_max).into_iter().collect();
            for term in distinct {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, column);
        }

        Self {
            ngram_max,
            vocabulary,
            idf,
        }
    }

    /// Number of feature columns.
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// L2-normalized TF-IDF vector for `text`. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms(text, self.ngram_max) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .filter_map(|(column, tf)| self.idf.get(column).map(|idf| (column, tf * idf)))
            .collect();
        vector.sort_unstable_by_key(|(column, _)| *column);

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    /// Consistency check for artifacts read from disk.
    pub fn validate(&self) -> Result<(), String> {
        if self.ngram_max == 0 {
            return Err("ngram_max must be at least 1".into());
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} entries",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        if let Some((term, column)) = self.vocabulary.iter().find(|(_, c)| **c >= self.idf.len()) {
            return Err(format!("term {term:?} maps to out-of-range column {column}"));
        }
        Ok(())
    }
}

/// Lowercased word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All n-grams of length `1..=ngram_max`, space-joined.
fn terms(text: &str, ngram_max: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut out = Vec::new();
    for n in 1..=ngram_max {
        if tokens.len() < n {
            break;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}
