//! Lazy, process-lifetime cache for the trained model artifact.
//!
//! The artifact is read on first use and kept for the life of the gateway.
//! A failed or skipped load is not remembered: the next call tries again
//! while the cache is still empty. Concurrent first calls may each read the
//! file; only one result is kept.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::classifier::model::ProbabilityModel;
use crate::error::ModelError;
use crate::ml::TextPipeline;

/// Reads an artifact from disk.
pub type ModelLoader =
    dyn Fn(&Path) -> Result<Arc<dyn ProbabilityModel>, ModelError> + Send + Sync;

/// Gives access to the trained model, loading it on demand.
pub struct ModelGateway {
    path: PathBuf,
    loader: Box<ModelLoader>,
    cached: OnceLock<Arc<dyn ProbabilityModel>>,
}

impl ModelGateway {
    /// Gateway over a JSON [`TextPipeline`] artifact at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_loader(path, |p: &Path| {
            let model: Arc<dyn ProbabilityModel> = Arc::new(TextPipeline::load(p)?);
            Ok(model)
        })
    }

    /// Gateway with a custom loader.
    pub fn with_loader<F>(path: impl Into<PathBuf>, loader: F) -> Self
    where
        F: Fn(&Path) -> Result<Arc<dyn ProbabilityModel>, ModelError> + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            loader: Box::new(loader),
            cached: OnceLock::new(),
        }
    }

    /// Gateway whose model is already in memory.
    pub fn preloaded(model: Arc<dyn ProbabilityModel>) -> Self {
        let gateway = Self::new(PathBuf::new());
        let _ = gateway.cached.set(model);
        gateway
    }

    /// The cached model, loading it first if needed.
    ///
    /// A missing file yields [`ModelError::NotFound`]; an unreadable one
    /// yields the loader's error. Neither is cached.
    pub fn get_model(&self) -> Result<Arc<dyn ProbabilityModel>, ModelError> {
        if let Some(model) = self.cached.get() {
            return Ok(Arc::clone(model));
        }

        if !self.path.exists() {
            debug!(path = %self.path.display(), "Model artifact not present");
            return Err(ModelError::NotFound {
                path: self.path.clone(),
            });
        }

        match (self.loader)(&self.path) {
            Ok(model) => {
                // Another caller may have won the race; keep whichever landed first.
                let kept = self.cached.get_or_init(|| model);
                info!(path = %self.path.display(), "Model artifact loaded");
                Ok(Arc::clone(kept))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load model artifact");
                Err(e)
            }
        }
    }

    /// Whether a model is currently held in memory.
    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Location the artifact is read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
