//! Trained text classifier: TF-IDF vectorizer + logistic regression.
//!
//! The fitted pipeline is persisted as JSON and implements
//! [`ProbabilityModel`] so the decision engine can consume it.

pub mod logistic;
pub mod tfidf;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::model::ProbabilityModel;
use crate::error::{ModelError, TrainError};

pub use logistic::{FitParams, LogisticRegression};
pub use tfidf::{SparseVector, TfidfVectorizer};

/// Longest n-gram the vectorizer learns.
pub const DEFAULT_NGRAM_MAX: usize = 2;

/// Vectorizer + classifier, fitted together and persisted as one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPipeline {
    pub format_version: u32,
    /// Label per probability column; `classes[1]` is the positive class.
    pub classes: Vec<String>,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticRegression,
}

impl TextPipeline {
    /// Artifact layout version written by [`save`](Self::save).
    pub const FORMAT_VERSION: u32 = 1;

    /// Fit on `texts` with parallel `labels`. Exactly two distinct labels are required.
    ///
    /// Classes are sorted so the column order is stable; samples are weighted
    /// `n / (2 * count(label))` to balance the classes.
    pub fn fit<S: AsRef<str>>(
        texts: &[S],
        labels: &[String],
        params: FitParams,
    ) -> Result<Self, TrainError> {
        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() != 2 {
            return Err(TrainError::ClassCount {
                found: classes.len(),
                labels: classes,
            });
        }

        let vectorizer = TfidfVectorizer::fit(texts, DEFAULT_NGRAM_MAX);
        let samples: Vec<SparseVector> = texts
            .iter()
            .map(|t| vectorizer.transform(t.as_ref()))
            .collect();
        let targets: Vec<bool> = labels.iter().map(|l| *l == classes[1]).collect();

        let n = labels.len() as f64;
        let positives = targets.iter().filter(|t| **t).count() as f64;
        let negatives = n - positives;
        let weights: Vec<f64> = targets
            .iter()
            .map(|t| if *t { n / (2.0 * positives) } else { n / (2.0 * negatives) })
            .collect();

        let classifier =
            LogisticRegression::fit(&samples, &targets, &weights, vectorizer.len(), params);

        Ok(Self {
            format_version: Self::FORMAT_VERSION,
            classes,
            vectorizer,
            classifier,
        })
    }

    /// Read and validate an artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let load_error = |reason: String| ModelError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let pipeline: Self = serde_json::from_slice(&bytes).map_err(|e| load_error(e.to_string()))?;
        pipeline.validate().map_err(load_error)?;
        Ok(pipeline)
    }

    /// Write the artifact as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let persist_error = |reason: String| ModelError::Persist {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| persist_error(e.to_string()))?;
        }
        let json = serde_json::to_vec_pretty(self).map_err(|e| persist_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| persist_error(e.to_string()))
    }

    /// Structural consistency of a deserialized artifact.
    pub fn validate(&self) -> Result<(), String> {
        if self.format_version != Self::FORMAT_VERSION {
            return Err(format!(
                "unsupported format version {} (expected {})",
                self.format_version,
                Self::FORMAT_VERSION
            ));
        }
        if self.classes.len() != 2 {
            return Err(format!("expected 2 classes, found {}", self.classes.len()));
        }
        self.vectorizer.validate()?;
        if self.classifier.coef.len() != self.vectorizer.len() {
            return Err(format!(
                "classifier has {} weights for {} features",
                self.classifier.coef.len(),
                self.vectorizer.len()
            ));
        }
        Ok(())
    }

    /// Probability of `classes[1]`.
    pub fn positive_probability(&self, text: &str) -> f64 {
        self.classifier.probability(&self.vectorizer.transform(text))
    }

    /// Most likely label for `text`.
    pub fn predict(&self, text: &str) -> &str {
        if self.positive_probability(text) >= 0.5 {
            &self.classes[1]
        } else {
            &self.classes[0]
        }
    }
}

impl ProbabilityModel for TextPipeline {
    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ModelError> {
        let p = self.positive_probability(text);
        if !p.is_finite() {
            return Err(ModelError::Inference(format!("non-finite score {p}")));
        }
        Ok(vec![1.0 - p, p])
    }

    fn classes(&self) -> Option<&[String]> {
        Some(&self.classes)
    }
}
