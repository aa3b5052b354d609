//! Lemmatizer backend: the analyzer capability interface, a lexicon-based
//! analyzer and the rule tokenizer that feeds it.

pub mod analyzer;
pub mod tokenizer;

pub use analyzer::{
    AnalyzedToken, LemmatizerBackend, LexiconAnalyzer, MorphAnalyzer, Parse, PipelineBackend,
};
pub use tokenizer::RuleTokenizer;
