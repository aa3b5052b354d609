// File: src/nlp/analyzer.rs
use crate::config::AnalysisConfig;
use crate::core::corpus::CorpusToken;
use crate::core::types::{Lemma, PosTag};
use crate::errors::{BigramError, Result};
use crate::nlp::tokenizer::RuleTokenizer;
use std::collections::HashMap;
use std::path::Path;

/// What the morphological analyzer reports for a single token.
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    pub lemma: Lemma,
    pub pos: Option<PosTag>,
    pub is_punctuation: bool,
}

/// Capability interface over a morphological analyzer.
pub trait MorphAnalyzer {
    fn parse(&self, token: &str) -> Result<Parse>;
}

/// A token of lemmatizer output.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedToken {
    pub surface: String,
    pub lemma: Lemma,
    pub pos: Option<PosTag>,
    pub is_punctuation: bool,
}

impl From<AnalyzedToken> for CorpusToken {
    /// Punctuation keeps its surface form, words are replaced by their lemma.
    fn from(token: AnalyzedToken) -> Self {
        let text = if token.is_punctuation { token.surface } else { token.lemma };
        CorpusToken { text, pos: token.pos, is_punctuation: token.is_punctuation }
    }
}

/// Turns raw text into lemmatized sentences.
pub trait LemmatizerBackend {
    fn analyze(&self, text: &str) -> Result<Vec<Vec<AnalyzedToken>>>;
}

/// Dictionary-driven analyzer.
///
/// Lexicon lines are `form<TAB>lemma[<TAB>POS]`. Forms and lemmas are stored
/// lowercased, so every lemma is case-neutral; unknown words lemmatize to
/// themselves, lowercased, without a tag.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    entries: HashMap<String, (Lemma, Option<PosTag>)>,
    strict: bool,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode a word missing from the lexicon is a backend failure.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn insert(&mut self, form: &str, lemma: &str, pos: Option<PosTag>) {
        self.entries.insert(form.to_lowercase(), (lemma.to_lowercase(), pos));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_tsv(source: &str) -> Result<Self> {
        let mut analyzer = Self::new();
        for (line_no, line) in source.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            match fields.as_slice() {
                [form, lemma] if !form.is_empty() && !lemma.is_empty() => {
                    analyzer.insert(form, lemma, None);
                }
                [form, lemma, pos] if !form.is_empty() && !lemma.is_empty() => {
                    let pos = if pos.is_empty() { None } else { Some(PosTag::new(*pos)) };
                    analyzer.insert(form, lemma, pos);
                }
                _ => {
                    return Err(BigramError::Config(format!(
                        "lexicon line {}: expected 'form<TAB>lemma[<TAB>POS]'",
                        line_no + 1
                    )));
                }
            }
        }
        Ok(analyzer)
    }

    pub fn from_tsv_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_tsv(&source)
    }
}

impl MorphAnalyzer for LexiconAnalyzer {
    fn parse(&self, token: &str) -> Result<Parse> {
        if token.is_empty() {
            return Err(BigramError::Backend {
                token: String::new(),
                reason: "empty token".into(),
            });
        }
        if !token.chars().any(char::is_alphanumeric) {
            return Ok(Parse {
                lemma: token.to_string(),
                pos: Some(PosTag::new(PosTag::PUNCTUATION)),
                is_punctuation: true,
            });
        }

        let form = token.to_lowercase();
        match self.entries.get(&form) {
            Some((lemma, pos)) => Ok(Parse {
                lemma: lemma.clone(),
                pos: pos.clone(),
                is_punctuation: false,
            }),
            None if self.strict => Err(BigramError::Backend {
                token: token.to_string(),
                reason: "word is not in the lexicon".into(),
            }),
            None => Ok(Parse { lemma: form, pos: None, is_punctuation: false }),
        }
    }
}

/// Preprocessing, sentence splitting and word tokenization around any analyzer.
pub struct PipelineBackend<A: MorphAnalyzer> {
    analyzer: A,
    tokenizer: RuleTokenizer,
    strip_chars: Vec<char>,
}

impl<A: MorphAnalyzer> PipelineBackend<A> {
    pub fn new(analyzer: A, config: &AnalysisConfig) -> Self {
        Self {
            analyzer,
            tokenizer: RuleTokenizer::new(),
            strip_chars: config.strip_chars.clone(),
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }
}

impl<A: MorphAnalyzer> LemmatizerBackend for PipelineBackend<A> {
    fn analyze(&self, text: &str) -> Result<Vec<Vec<AnalyzedToken>>> {
        let cleaned: String = text.chars().filter(|c| !self.strip_chars.contains(c)).collect();

        let mut sentences = Vec::new();
        for sentence in self.tokenizer.sentences(&cleaned) {
            let mut tokens = Vec::new();
            for word in self.tokenizer.words(sentence) {
                let parse = self.analyzer.parse(word)?;
                tokens.push(AnalyzedToken {
                    surface: word.to_string(),
                    lemma: parse.lemma,
                    pos: parse.pos,
                    is_punctuation: parse.is_punctuation,
                });
            }
            sentences.push(tokens);
        }
        Ok(sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "# form\tlemma\tpos\n\
                           кошки\tкошка\tNOUN\n\
                           сидели\tсидеть\tVERB\n\
                           \n\
                           на\tна\n";

    #[test]
    fn test_lexicon_lookup_is_case_insensitive() {
        let analyzer = LexiconAnalyzer::from_tsv(LEXICON).unwrap();
        assert_eq!(analyzer.len(), 3);

        let parse = analyzer.parse("Кошки").unwrap();
        assert_eq!(parse.lemma, "кошка");
        assert_eq!(parse.pos, Some(PosTag::new("NOUN")));
        assert!(!parse.is_punctuation);

        assert_eq!(analyzer.parse("на").unwrap().pos, None);
    }

    #[test]
    fn test_capitalized_lemmas_are_lowercased() {
        let analyzer = LexiconAnalyzer::from_tsv("Москвы\tМосква\tNOUN\n").unwrap();
        assert_eq!(analyzer.parse("москвы").unwrap().lemma, "москва");
        assert_eq!(analyzer.parse("Москва").unwrap().lemma, "москва");
    }

    #[test]
    fn test_unknown_words_fall_back_to_lowercase() {
        let analyzer = LexiconAnalyzer::new();
        let parse = analyzer.parse("Москва").unwrap();
        assert_eq!(parse.lemma, "москва");
        assert_eq!(parse.pos, None);
    }

    #[test]
    fn test_strict_mode_reports_unknown_words() {
        let analyzer = LexiconAnalyzer::from_tsv(LEXICON).unwrap().strict(true);
        match analyzer.parse("собаки") {
            Err(BigramError::Backend { token, .. }) => assert_eq!(token, "собаки"),
            other => panic!("expected backend failure, got {:?}", other),
        }
    }

    #[test]
    fn test_punctuation_is_flagged() {
        let parse = LexiconAnalyzer::new().parse("«").unwrap();
        assert!(parse.is_punctuation);
        assert_eq!(parse.pos.as_ref().map(PosTag::as_str), Some("PNCT"));
    }

    #[test]
    fn test_malformed_lexicon_line() {
        let err = LexiconAnalyzer::from_tsv("кот\tкот\n\tпусто\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_pipeline_backend() {
        let analyzer = LexiconAnalyzer::from_tsv(LEXICON).unwrap();
        let backend = PipelineBackend::new(analyzer, &AnalysisConfig::default());
        let sentences = backend.analyze("Кошки сидели на `окне`. Тихо!").unwrap();

        assert_eq!(sentences.len(), 2);
        let lemmas: Vec<_> = sentences[0].iter().map(|t| t.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["кошка", "сидеть", "на", "окне", "."]);
        assert_eq!(sentences[0][0].surface, "Кошки");
        assert!(sentences[0][4].is_punctuation);
        assert_eq!(sentences[1].len(), 2);
    }

    #[test]
    fn test_combining_marks_do_not_split_lemmas() {
        let backend = PipelineBackend::new(LexiconAnalyzer::new(), &AnalysisConfig::default());
        let sentences = backend.analyze("नमस्ते दुनिया. Мои\u{306} кот.").unwrap();

        let lemmas: Vec<Vec<&str>> = sentences
            .iter()
            .map(|s| s.iter().map(|t| t.lemma.as_str()).collect())
            .collect();
        assert_eq!(
            lemmas,
            vec![vec!["नमस्ते", "दुनिया", "."], vec!["мои\u{306}", "кот", "."]]
        );
        assert!(sentences.iter().flatten().filter(|t| t.is_punctuation).all(|t| t.surface == "."));
    }

    #[test]
    fn test_backend_failure_propagates() {
        let analyzer = LexiconAnalyzer::from_tsv(LEXICON).unwrap().strict(true);
        let backend = PipelineBackend::new(analyzer, &AnalysisConfig::default());
        assert!(matches!(
            backend.analyze("Кошки спят."),
            Err(BigramError::Backend { .. })
        ));
    }
}
