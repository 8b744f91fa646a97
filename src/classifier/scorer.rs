//! Lexical scorer: counts productive vs courtesy signals in free text.
//!
//! Text is lowercased and accent-folded before matching. Each base rule
//! contributes its weight at most once; the two boosters are applied after
//! the base sweep and are likewise applied at most once.

use regex::{Regex, RegexBuilder};
use tracing::trace;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::classifier::lexicon::{
    ACTION_BOOST, COURTESY_RULES, LexiconEntry, PRODUCTIVE_RULES, REQUEST_BOOST,
};
use crate::classifier::types::HitCounts;

/// A lexicon entry with its compiled regex.
#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    weight: u32,
}

impl CompiledRule {
    fn compile(entry: &LexiconEntry) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(entry.pattern)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            regex,
            weight: entry.weight,
        })
    }

    /// Weight if the rule matches anywhere, zero otherwise.
    fn score(&self, text: &str) -> u32 {
        if self.regex.is_match(text) {
            self.weight
        } else {
            0
        }
    }
}

/// Regex-driven scorer over the productive and courtesy rule tables.
#[derive(Debug, Clone)]
pub struct LexicalScorer {
    productive: Vec<CompiledRule>,
    courtesy: Vec<CompiledRule>,
    boosters: Vec<CompiledRule>,
}

impl LexicalScorer {
    /// Scorer over the built-in lexicon.
    pub fn default_rules() -> Self {
        Self::from_tables(
            PRODUCTIVE_RULES,
            COURTESY_RULES,
            &[ACTION_BOOST, REQUEST_BOOST],
        )
        .expect("built-in lexicon patterns must compile")
    }

    /// Build a scorer from arbitrary tables. Boosters add to the productive side.
    pub fn from_tables(
        productive: &[LexiconEntry],
        courtesy: &[LexiconEntry],
        boosters: &[LexiconEntry],
    ) -> Result<Self, regex::Error> {
        let compile_all = |entries: &[LexiconEntry]| {
            entries
                .iter()
                .map(CompiledRule::compile)
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(Self {
            productive: compile_all(productive)?,
            courtesy: compile_all(courtesy)?,
            boosters: compile_all(boosters)?,
        })
    }

    /// Count productive and courtesy hits in `text`.
    pub fn score(&self, text: &str) -> HitCounts {
        let folded = fold_accents(&text.to_lowercase());

        let mut productive: u32 = self.productive.iter().map(|r| r.score(&folded)).sum();
        let courtesy: u32 = self.courtesy.iter().map(|r| r.score(&folded)).sum();

        for booster in &self.boosters {
            productive = productive.saturating_add(booster.score(&folded));
        }

        trace!(productive, courtesy, "Lexical score");
        HitCounts::new(productive, courtesy)
    }
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::default_rules()
    }
}

/// Strip diacritics so `ç` matches `c`, `ã` matches `a`, and so on.
///
/// Canonical decomposition (NFD) followed by removal of every combining mark,
/// so precomposed and already-decomposed input fold the same way.
pub fn fold_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
