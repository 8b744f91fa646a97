//! Confidence arithmetic for the two decision paths.
//!
//! The heuristic formula and the hybrid meta-score are independent and are
//! never mixed within one decision.

use crate::classifier::types::{Category, HitCounts};

/// Confidence bounds on the rules-only path.
pub const HEURISTIC_FLOOR: f64 = 0.50;
pub const HEURISTIC_CEILING: f64 = 0.99;

/// Confidence bounds when a trained model took part.
pub const HYBRID_FLOOR: f64 = 0.60;
pub const HYBRID_CEILING: f64 = 0.99;

/// Meta-score added per point of productive lead.
const LEXICAL_LEAD_STEP: f64 = 0.05;

/// Confidence from hit counts alone.
///
/// `base = p / max(1, p + c)`, plus 0.10 when the sides differ by two or
/// more, plus a further 0.05 when productive leads by three or more,
/// clamped to `[0.50, 0.99]`.
pub fn heuristic_confidence(hits: HitCounts) -> f64 {
    let p = f64::from(hits.productive);
    let total = (hits.productive.saturating_add(hits.courtesy)).max(1);
    let base = p / f64::from(total);

    let margin = hits.margin();
    let spread = if margin.abs() >= 2 { 0.10 } else { 0.0 };
    let lead = if margin >= 3 { 0.05 } else { 0.0 };

    (base + spread + lead).clamp(HEURISTIC_FLOOR, HEURISTIC_CEILING)
}

/// Blend the model's productive probability with the lexical lead.
///
/// `model_prob + 0.05 * max(0, p - c)`, clamped to `[0, 1]`. A non-finite
/// probability is treated as neutral.
pub fn meta_score(model_prob: f64, hits: HitCounts) -> f64 {
    let prob = if model_prob.is_finite() { model_prob } else { 0.5 };
    let lead = hits.margin().max(0) as f64;
    (prob + LEXICAL_LEAD_STEP * lead).clamp(0.0, 1.0)
}

/// Category and confidence on the hybrid path.
///
/// `Produtivo` when the meta-score reaches 0.5 *or* the lexical hits lean
/// productive; the lexical side can override a model probability below 0.5.
pub fn hybrid_decision(model_prob: f64, hits: HitCounts) -> (Category, f64) {
    let meta = meta_score(model_prob, hits);
    let category = Category::from_productive(meta >= 0.5 || hits.leans_productive());
    let confidence = meta.clamp(HYBRID_FLOOR, HYBRID_CEILING);
    (category, confidence)
}
