//! Shared types for the decision engine.

use serde::{Deserialize, Serialize};

use crate::classifier::responders::reply_for;

// ── Category ────────────────────────────────────────────────────────

/// Business category of an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Requires action or a response.
    Produtivo,
    /// Courtesy, no action needed.
    Improdutivo,
}

impl Category {
    /// Label exactly as it appears in datasets and model artifacts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Produtivo => "Produtivo",
            Self::Improdutivo => "Improdutivo",
        }
    }

    /// `Produtivo` when `productive` holds, `Improdutivo` otherwise.
    pub fn from_productive(productive: bool) -> Self {
        if productive {
            Self::Produtivo
        } else {
            Self::Improdutivo
        }
    }
}

// ── Origin ──────────────────────────────────────────────────────────

/// Which path produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Trained model blended with lexical hits.
    Modelo,
    /// Lexical rules only.
    Heuristica,
}

impl Origin {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Modelo => "modelo",
            Self::Heuristica => "heuristica",
        }
    }
}

// ── Hit counts ──────────────────────────────────────────────────────

/// Lexical evidence for each side. Only ever grows during scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCounts {
    pub productive: u32,
    pub courtesy: u32,
}

impl HitCounts {
    pub fn new(productive: u32, courtesy: u32) -> Self {
        Self {
            productive,
            courtesy,
        }
    }

    /// `productive - courtesy` as a signed value.
    pub fn margin(&self) -> i64 {
        i64::from(self.productive) - i64::from(self.courtesy)
    }

    /// Lexical-only verdict: ties go to `Produtivo`.
    pub fn leans_productive(&self) -> bool {
        self.productive >= self.courtesy
    }
}

// ── Classification ──────────────────────────────────────────────────

/// Final decision returned to callers, serialized with the public API's field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "confianca")]
    pub confidence: f64,
    #[serde(rename = "resposta_sugerida")]
    pub suggested_reply: String,
    #[serde(rename = "origem")]
    pub origin: Origin,
}

impl Classification {
    /// Build a result whose reply comes from the responder bank.
    pub fn new(category: Category, confidence: f64, origin: Origin) -> Self {
        Self {
            category,
            confidence,
            suggested_reply: reply_for(category).to_string(),
            origin,
        }
    }

    /// Fixed result for empty or whitespace-only input.
    pub fn empty_input() -> Self {
        Self::new(Category::Improdutivo, 0.5, Origin::Heuristica)
    }
}
