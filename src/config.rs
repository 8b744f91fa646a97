//! Configuration types.

use std::path::PathBuf;

/// Fixed on-disk location of the trained model artifact.
pub const DEFAULT_MODEL_PATH: &str = "data/model.json";

/// Default labelled dataset used by `train`.
pub const DEFAULT_DATASET_PATH: &str = "data/samples.csv";

/// Maximum accepted upload size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// HTTP service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Where the trained artifact lives.
    pub model_path: PathBuf,
    /// Upload size limit in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("CLASSIFIER_HOST").unwrap_or(defaults.host);

        let port: u16 = std::env::var("CLASSIFIER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let model_path = std::env::var("CLASSIFIER_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let max_upload_bytes: usize = std::env::var("CLASSIFIER_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_upload_bytes);

        Self {
            host,
            port,
            model_path,
            max_upload_bytes,
        }
    }

    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Offline training configuration.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// CSV file with `text,label` columns.
    pub dataset_path: PathBuf,
    /// Where to write the fitted artifact.
    pub model_path: PathBuf,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Share of rows held out for evaluation.
    pub test_fraction: f64,
    /// Gradient descent iteration cap.
    pub max_iter: usize,
    /// Inverse L2 regularization strength.
    pub c: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            seed: 42,
            test_fraction: 0.25,
            max_iter: 1000,
            c: 1.0,
        }
    }
}

impl TrainConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let dataset_path = std::env::var("CLASSIFIER_DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path);

        let model_path = std::env::var("CLASSIFIER_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let seed: u64 = std::env::var("CLASSIFIER_TRAIN_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        // Outside (0, 1) the split is meaningless.
        let test_fraction: f64 = std::env::var("CLASSIFIER_TEST_FRACTION")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|f: &f64| *f > 0.0 && *f < 1.0)
            .unwrap_or(defaults.test_fraction);

        Self {
            dataset_path,
            model_path,
            seed,
            test_fraction,
            ..defaults
        }
    }
}
