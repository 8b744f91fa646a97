//! Offline training: CSV dataset → fitted [`TextPipeline`] on disk.
//!
//! 1. Load `text,label` rows, skipping blanks
//! 2. Split train/test with a seeded shuffle (stratified when possible)
//! 3. Fit TF-IDF + logistic regression, evaluate on the held-out rows
//! 4. Persist the artifact where the classifier will look for it
//!
//! Tiny datasets, or splits that leave a class out of either side, are
//! fitted on every row and skip evaluation.

pub mod dataset;
pub mod report;

use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::config::TrainConfig;
use crate::error::TrainError;
use crate::ml::{FitParams, TextPipeline};

pub use dataset::Dataset;
pub use report::{ClassMetrics, ClassificationReport};

/// Below this many rows, evaluation is skipped.
pub const MIN_ROWS_FOR_EVALUATION: usize = 6;

/// What a training run produced.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub rows: usize,
    pub class_counts: BTreeMap<String, usize>,
    /// `None` when the whole dataset was used for fitting.
    pub report: Option<ClassificationReport>,
    pub model_path: PathBuf,
}

/// Row indices for each side of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Train and persist a model according to `config`.
pub fn train(config: &TrainConfig) -> Result<TrainOutcome, TrainError> {
    let dataset = Dataset::from_csv_path(&config.dataset_path)?;
    let class_counts = dataset.class_counts();
    info!(rows = dataset.len(), classes = ?class_counts, "Dataset loaded");

    if class_counts.len() != 2 {
        return Err(TrainError::ClassCount {
            found: class_counts.len(),
            labels: class_counts.keys().cloned().collect(),
        });
    }

    let params = FitParams {
        c: config.c,
        max_iter: config.max_iter,
        ..FitParams::default()
    };

    let (pipeline, report) = if dataset.len() < MIN_ROWS_FOR_EVALUATION {
        warn!(
            rows = dataset.len(),
            "Dataset too small, fitting on every row and skipping evaluation"
        );
        (TextPipeline::fit(&dataset.texts, &dataset.labels, params)?, None)
    } else {
        match split(&dataset, config.test_fraction, config.seed) {
            Some(split) => {
                let train_set = dataset.select(&split.train);
                let test_set = dataset.select(&split.test);
                let pipeline = TextPipeline::fit(&train_set.texts, &train_set.labels, params)?;
                let report = evaluate(&pipeline, &test_set);
                info!(
                    train_rows = train_set.len(),
                    test_rows = test_set.len(),
                    accuracy = report.accuracy,
                    "Held-out evaluation\n{report}"
                );
                (pipeline, Some(report))
            }
            None => {
                warn!("Split left a class out of one side, fitting on every row");
                (TextPipeline::fit(&dataset.texts, &dataset.labels, params)?, None)
            }
        }
    };

    pipeline.save(&config.model_path)?;
    info!(path = %config.model_path.display(), "Model saved");

    Ok(TrainOutcome {
        rows: dataset.len(),
        class_counts,
        report,
        model_path: config.model_path.clone(),
    })
}

/// Seeded train/test split.
///
/// Stratified when every class has at least two rows. Returns `None` when
/// either side would miss a class.
pub fn split(dataset: &Dataset, test_fraction: f64, seed: u64) -> Option<Split> {
    let mut rng = StdRng::seed_from_u64(seed);
    let class_counts = dataset.class_counts();
    let stratify = class_counts.values().all(|count| *count >= 2);

    let mut split = Split {
        train: Vec::new(),
        test: Vec::new(),
    };

    if stratify {
        for label in class_counts.keys() {
            let mut indices: Vec<usize> = (0..dataset.len())
                .filter(|&i| dataset.labels[i] == *label)
                .collect();
            indices.shuffle(&mut rng);
            let n_test = test_size(indices.len(), test_fraction);
            split.test.extend_from_slice(&indices[..n_test]);
            split.train.extend_from_slice(&indices[n_test..]);
        }
    } else {
        warn!("A class has a single row, splitting without stratification");
        let mut indices: Vec<usize> = (0..dataset.len()).collect();
        indices.shuffle(&mut rng);
        let n_test = test_size(indices.len(), test_fraction);
        split.test.extend_from_slice(&indices[..n_test]);
        split.train.extend_from_slice(&indices[n_test..]);
    }

    split.train.sort_unstable();
    split.test.sort_unstable();

    let covers_all = |side: &[usize]| {
        class_counts
            .keys()
            .all(|label| side.iter().any(|&i| dataset.labels[i] == *label))
    };
    if covers_all(&split.train) && covers_all(&split.test) {
        Some(split)
    } else {
        None
    }
}

/// Held-out rows for a group of `n`: at least one, never all.
fn test_size(n: usize, test_fraction: f64) -> usize {
    if n < 2 {
        return 0;
    }
    ((n as f64 * test_fraction).ceil() as usize).clamp(1, n - 1)
}

/// Score `pipeline` on `test_set`.
pub fn evaluate(pipeline: &TextPipeline, test_set: &Dataset) -> ClassificationReport {
    let predicted: Vec<String> = test_set
        .texts
        .iter()
        .map(|t| pipeline.predict(t).to_string())
        .collect();
    ClassificationReport::compute(&pipeline.classes, &test_set.labels, &predicted)
}
