//! Error types for the inbox classifier.
//!
//! The decision engine itself never surfaces an error: the variants below
//! describe failures at its boundaries (model loading, inference, text
//! extraction, uploads, training) so callers can branch on them explicitly.

use std::path::PathBuf;

/// Model artifact errors (loading and inference).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to load model artifact from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Model does not expose class probabilities")]
    ProbabilityUnsupported,

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model returned unusable output: {0}")]
    MalformedOutput(String),

    #[error("Failed to persist model artifact to {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },
}

/// Errors raised while turning uploaded bytes into plain text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Falha ao ler PDF: {0}")]
    Pdf(String),
}

/// Upload boundary errors, rejected before the classifier runs.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Arquivo vazio.")]
    Empty,

    #[error("Arquivo muito grande (máx. 5MB).")]
    TooLarge { size: usize, max: usize },

    #[error("Tipo de arquivo não suportado. Use .txt, .pdf ou .eml.")]
    UnsupportedType { extension: String },

    #[error("Requisição inválida: {0}")]
    Malformed(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Offline training errors.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("No usable rows found in {}", path.display())]
    EmptyDataset { path: PathBuf },

    #[error("Expected exactly two labels, found {found}: {labels:?}")]
    ClassCount { found: usize, labels: Vec<String> },

    #[error("Failed to read dataset {}: {reason}", path.display())]
    Dataset { path: PathBuf, reason: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
