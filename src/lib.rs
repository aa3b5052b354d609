// src/lib.rs

pub mod config;
pub mod core;
pub mod errors;
pub mod nlp;
pub mod persistence;
pub mod report;

pub use crate::config::AnalysisConfig;
pub use crate::core::corpus::{Corpus, CorpusToken, Sentence};
pub use crate::core::engine::BigramAnalyzer;
pub use crate::core::types::{AssociationScore, Bigram, Lemma, Measure, PosTag};
pub use crate::errors::{BigramError, Result};
