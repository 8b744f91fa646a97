//! Hybrid email classifier.
//!
//! Text flows through:
//! 1. `ModelGateway::get_model()`: lazily loaded trained artifact
//! 2. `LexicalScorer::score()`: regex hit counts (productive vs courtesy)
//! 3. `confidence`: hybrid meta-score, or rules-only confidence on fallback
//! 4. `responders::reply_for()`: canned reply for the chosen category
//!
//! `Classifier::classify()` never fails: any model problem demotes the
//! request to the rules-only path.

pub mod confidence;
pub mod engine;
pub mod gateway;
pub mod lexicon;
pub mod model;
pub mod responders;
pub mod scorer;
pub mod types;

pub use engine::Classifier;
pub use gateway::ModelGateway;
pub use model::ProbabilityModel;
pub use scorer::LexicalScorer;
pub use types::{Category, Classification, HitCounts, Origin};
