//! Labelled dataset loading (`text,label` CSV).

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::TrainError;

/// One CSV row. Missing columns read as empty.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

/// Parallel text and label columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl Dataset {
    /// Load a CSV file with a `text,label` header.
    pub fn from_csv_path(path: &Path) -> Result<Self, TrainError> {
        let file = std::fs::File::open(path).map_err(|e| TrainError::Dataset {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let dataset = Self::from_csv_reader(file).map_err(|reason| TrainError::Dataset {
            path: path.to_path_buf(),
            reason,
        })?;

        if dataset.is_empty() {
            return Err(TrainError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }
        Ok(dataset)
    }

    /// Parse CSV from any reader. Rows with an empty text or label are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, String> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut dataset = Self::default();
        for (line, record) in csv_reader.deserialize::<Row>().enumerate() {
            let row = record.map_err(|e| e.to_string())?;
            let text = row.text.unwrap_or_default();
            let label = row.label.unwrap_or_default();
            if text.is_empty() || label.is_empty() {
                warn!(row = line + 1, "Skipping dataset row with empty text or label");
                continue;
            }
            dataset.texts.push(text);
            dataset.labels.push(label);
        }
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Row count per label.
    pub fn class_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Rows at the given indices, in order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}
