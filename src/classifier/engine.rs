//! Decision orchestrator: trained model first, lexical rules as fallback.
//!
//! States, in order, terminal on the first that produces a result:
//! 1. Empty input → fixed `(Improdutivo, 0.50, courtesy reply, heuristica)`.
//! 2. Hybrid → model probability blended with lexical hits (`modelo`).
//! 3. Heuristic → lexical hits only (`heuristica`). Always succeeds.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::classifier::confidence::{heuristic_confidence, hybrid_decision};
use crate::classifier::gateway::ModelGateway;
use crate::classifier::model::productive_probability;
use crate::classifier::scorer::LexicalScorer;
use crate::classifier::types::{Category, Classification, Origin};
use crate::error::ModelError;

/// Public entry point of the decision engine.
#[derive(Debug)]
pub struct Classifier {
    gateway: Arc<ModelGateway>,
    scorer: LexicalScorer,
}

impl Classifier {
    /// Classifier over the artifact at `model_path` and the built-in lexicon.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self::with_parts(Arc::new(ModelGateway::new(model_path)), LexicalScorer::default_rules())
    }

    pub fn with_parts(gateway: Arc<ModelGateway>, scorer: LexicalScorer) -> Self {
        Self { gateway, scorer }
    }

    /// The model gateway (for diagnostics).
    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    /// Classify `text`. Never fails.
    pub fn classify(&self, text: &str) -> Classification {
        let text = text.trim();
        if text.is_empty() {
            return Classification::empty_input();
        }

        let result = match self.classify_hybrid(text) {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "Hybrid path unavailable, falling back to heuristics");
                self.classify_heuristic(text)
            }
        };

        info!(
            origin = result.origin.label(),
            category = result.category.label(),
            confidence = result.confidence,
            "Email classified"
        );
        result
    }

    /// Model probability blended with lexical hits.
    fn classify_hybrid(&self, text: &str) -> Result<Classification, ModelError> {
        let model = self.gateway.get_model()?;
        let probability = productive_probability(model.as_ref(), text);
        let hits = self.scorer.score(text);
        let (category, confidence) = hybrid_decision(probability, hits);

        debug!(
            probability,
            productive_hits = hits.productive,
            courtesy_hits = hits.courtesy,
            "Hybrid decision"
        );
        Ok(Classification::new(category, confidence, Origin::Modelo))
    }

    /// Lexical hits only.
    fn classify_heuristic(&self, text: &str) -> Classification {
        let hits = self.scorer.score(text);
        let category = Category::from_productive(hits.leans_productive());
        let confidence = heuristic_confidence(hits);

        debug!(
            productive_hits = hits.productive,
            courtesy_hits = hits.courtesy,
            "Heuristic decision"
        );
        Classification::new(category, confidence, Origin::Heuristica)
    }
}
