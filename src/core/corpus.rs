// File: src/core/corpus.rs
use crate::core::types::{Lemma, PosTag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One token handed over by the lemmatizer: a lemma, or the original
/// punctuation mark when `is_punctuation` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusToken {
    pub text: String,
    pub pos: Option<PosTag>,
    pub is_punctuation: bool,
}

impl CorpusToken {
    pub fn word(lemma: impl Into<String>) -> Self {
        Self { text: lemma.into(), pos: None, is_punctuation: false }
    }

    pub fn tagged(lemma: impl Into<String>, pos: PosTag) -> Self {
        Self { text: lemma.into(), pos: Some(pos), is_punctuation: false }
    }

    pub fn punctuation(mark: impl Into<String>) -> Self {
        Self {
            text: mark.into(),
            pos: Some(PosTag::new(PosTag::PUNCTUATION)),
            is_punctuation: true,
        }
    }
}

/// A lemmatized sentence.
///
/// `lemmas` is `display` with the punctuation tokens removed, order preserved.
/// `tags` runs parallel to `lemmas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    lemmas: Vec<Lemma>,
    tags: Vec<Option<PosTag>>,
    display: Vec<String>,
}

impl Sentence {
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = CorpusToken>,
    {
        let mut sentence = Self { lemmas: Vec::new(), tags: Vec::new(), display: Vec::new() };
        for token in tokens {
            if !token.is_punctuation {
                sentence.lemmas.push(token.text.clone());
                sentence.tags.push(token.pos);
            }
            sentence.display.push(token.text);
        }
        sentence
    }

    pub fn lemmas(&self) -> &[Lemma] {
        &self.lemmas
    }

    pub fn display_tokens(&self) -> &[String] {
        &self.display
    }

    /// Lemmas paired with the tag the analyzer gave them.
    pub fn tagged_lemmas(&self) -> impl Iterator<Item = (&Lemma, Option<&PosTag>)> {
        self.lemmas.iter().zip(self.tags.iter().map(Option::as_ref))
    }

    /// Human-readable rendering: lemmas and punctuation joined by single spaces.
    pub fn display_text(&self) -> String {
        self.display.join(" ")
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// An ordered, immutable sequence of lemmatized sentences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    sentences: Vec<Sentence>,
}

impl Corpus {
    /// Builds the corpus from lemmatizer output. Empty sentences are kept.
    pub fn from_sentences<S, T>(sentences: S) -> Self
    where
        S: IntoIterator<Item = T>,
        T: IntoIterator<Item = CorpusToken>,
    {
        Self { sentences: sentences.into_iter().map(Sentence::from_tokens).collect() }
    }

    /// Convenience for callers that already hold plain lemma sequences.
    pub fn from_lemmas<S, T, L>(sentences: S) -> Self
    where
        S: IntoIterator<Item = T>,
        T: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::from_sentences(
            sentences
                .into_iter()
                .map(|s| s.into_iter().map(CorpusToken::word).collect::<Vec<_>>()),
        )
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of lemmas (punctuation excluded).
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    /// Number of sentences with distinct lemma sequences.
    /// Used as the corpus size when normalizing MI.
    pub fn distinct_sentence_count(&self) -> usize {
        self.sentences
            .iter()
            .map(|s| s.lemmas.as_slice())
            .collect::<HashSet<_>>()
            .len()
    }

    /// One reconstructed sentence per line.
    pub fn lemma_text(&self) -> String {
        let mut text = String::new();
        for sentence in &self.sentences {
            text.push_str(&sentence.display_text());
            text.push('\n');
        }
        text
    }
}
