//! Trained-model seam used by the hybrid path.

use tracing::warn;

use crate::classifier::types::Category;
use crate::error::ModelError;

/// Label ordering assumed when a model does not report its own.
pub const DEFAULT_CLASSES: [&str; 2] = ["Improdutivo", "Produtivo"];

/// Probability returned when the model cannot give a usable answer.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// A fitted text classifier that can score one document at a time.
///
/// Implementations must be immutable once loaded: inference never mutates
/// shared state, so a single instance can serve concurrent callers.
pub trait ProbabilityModel: Send + Sync {
    /// Class probabilities for `text`, in [`classes`](Self::classes) order.
    fn predict_proba(&self, _text: &str) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::ProbabilityUnsupported)
    }

    /// Label ordering of the probability columns, if the model knows it.
    fn classes(&self) -> Option<&[String]> {
        None
    }
}

/// Probability that `text` is `Produtivo` according to `model`.
///
/// Any failure (no probability support, inference error, missing column,
/// non-finite value) is logged and collapses to [`NEUTRAL_PROBABILITY`].
pub fn productive_probability(model: &dyn ProbabilityModel, text: &str) -> f64 {
    match try_productive_probability(model, text) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Model probability unavailable, using neutral value");
            NEUTRAL_PROBABILITY
        }
    }
}

fn try_productive_probability(model: &dyn ProbabilityModel, text: &str) -> Result<f64, ModelError> {
    let probs = model.predict_proba(text)?;
    let index = productive_column(model.classes());

    let p = probs.get(index).copied().ok_or_else(|| {
        ModelError::MalformedOutput(format!(
            "no column {index} in {} probabilities",
            probs.len()
        ))
    })?;

    if !p.is_finite() {
        return Err(ModelError::MalformedOutput(format!(
            "non-finite probability {p}"
        )));
    }
    Ok(p)
}

/// Column holding the `Produtivo` probability; index 1 when the label is unknown.
fn productive_column(classes: Option<&[String]>) -> usize {
    let label = Category::Produtivo.label();
    match classes {
        Some(classes) => classes.iter().position(|c| c == label).unwrap_or(1),
        None => DEFAULT_CLASSES.iter().position(|c| *c == label).unwrap_or(1),
    }
}
