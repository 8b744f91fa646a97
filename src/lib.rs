//! Inbox Classifier: hybrid email triage (trained model + lexical rules).

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod ml;
pub mod training;
