use crate::config::AnalysisConfig;
use crate::core::corpus::{Corpus, CorpusToken};
use crate::core::frequency::{
    count_bigrams, count_parallel, count_unigrams, extract_bigrams, BigramFrequencyTable,
    UnigramFrequencyTable,
};
use crate::core::ranking::{PosFrequency, Ranker};
use crate::core::scorer::{AssociationScorer, ScoreTable};
use crate::core::types::{Bigram, Measure};
use crate::errors::Result;
use crate::nlp::analyzer::LemmatizerBackend;
use tracing::info;

/// The analysis pipeline: corpus, then frequency tables, then association scores.
///
/// Every stage is computed once at construction. The corpus never changes, so
/// the tables are only rebuilt by an explicit [`BigramAnalyzer::recount`].
pub struct BigramAnalyzer {
    corpus: Corpus,
    unigrams: UnigramFrequencyTable,
    bigrams: BigramFrequencyTable,
    scores: ScoreTable,
    parallel_counting: bool,
}

impl BigramAnalyzer {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, &AnalysisConfig::default())
    }

    pub fn with_config(corpus: Corpus, config: &AnalysisConfig) -> Self {
        let mut analyzer = Self {
            corpus,
            unigrams: UnigramFrequencyTable::new(),
            bigrams: BigramFrequencyTable::new(),
            scores: ScoreTable::default(),
            parallel_counting: config.parallel_counting,
        };
        analyzer.recount();
        analyzer
    }

    /// Lemmatizes `text` with `backend` and analyzes the result.
    /// Backend failures are returned as-is.
    pub fn from_text<B: LemmatizerBackend + ?Sized>(
        text: &str,
        backend: &B,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let sentences = backend.analyze(text)?;
        let corpus = Corpus::from_sentences(
            sentences
                .into_iter()
                .map(|s| s.into_iter().map(CorpusToken::from).collect::<Vec<_>>()),
        );
        Ok(Self::with_config(corpus, config))
    }

    /// Rebuilds both frequency tables, then the scores that depend on them.
    pub fn recount(&mut self) {
        let (unigrams, bigrams) = if self.parallel_counting {
            count_parallel(&self.corpus)
        } else {
            (count_unigrams(&self.corpus), count_bigrams(extract_bigrams(&self.corpus)))
        };
        self.unigrams = unigrams;
        self.bigrams = bigrams;
        info!(
            sentences = self.corpus.len(),
            lemmas = self.corpus.token_count(),
            distinct_lemmas = self.unigrams.len(),
            distinct_bigrams = self.bigrams.len(),
            "frequency tables built"
        );
        self.scores = self.rescore();
    }

    /// Scores the current tables. Calling it again without a recount gives identical scores.
    pub fn rescore(&self) -> ScoreTable {
        let scorer = AssociationScorer::new(self.corpus.distinct_sentence_count());
        let scores = scorer.score(&self.unigrams, &self.bigrams);
        info!(corpus_size = scorer.corpus_size(), scored = scores.len(), "bigrams scored");
        scores
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn unigrams(&self) -> &UnigramFrequencyTable {
        &self.unigrams
    }

    pub fn bigrams(&self) -> &BigramFrequencyTable {
        &self.bigrams
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn ranker(&self) -> Ranker<'_> {
        Ranker::new(&self.corpus, &self.unigrams, &self.bigrams, &self.scores)
    }

    pub fn word_frequency(&self, lemma: &str) -> u64 {
        self.ranker().word_frequency(lemma)
    }

    pub fn top_k_by_score(&self, measure: Measure, k: usize) -> Vec<(Bigram, f64)> {
        self.ranker().top_k_by_score(measure, k)
    }

    pub fn top_k_by_score_containing(
        &self,
        measure: Measure,
        word: &str,
        k: usize,
    ) -> Vec<(Bigram, f64)> {
        self.ranker().top_k_by_score_containing(measure, word, k)
    }

    pub fn top_k_raw_frequency_containing(&self, word: &str, k: usize) -> Vec<(Bigram, u64)> {
        self.ranker().top_k_raw_frequency_containing(word, k)
    }

    pub fn pos_frequencies(&self, pos: &str, k: usize) -> Vec<PosFrequency> {
        self.ranker().pos_frequencies(pos, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recount_is_stable() {
        let mut analyzer = BigramAnalyzer::new(Corpus::from_lemmas(vec![
            vec!["a", "b", "a", "b"],
            vec!["b", "a"],
        ]));
        let before = analyzer.scores().clone();
        analyzer.recount();
        assert_eq!(analyzer.scores(), &before);
        assert_eq!(analyzer.rescore(), before);
    }

    #[test]
    fn test_parallel_config_gives_same_rankings() {
        let corpus = Corpus::from_lemmas(vec![
            vec!["x", "y", "z"],
            vec!["y", "z"],
            vec!["z", "x", "y"],
        ]);
        let config = AnalysisConfig { parallel_counting: true, ..AnalysisConfig::default() };
        let parallel = BigramAnalyzer::with_config(corpus.clone(), &config);
        let sequential = BigramAnalyzer::new(corpus);

        for measure in Measure::ALL {
            assert_eq!(
                parallel.top_k_by_score(measure, 10),
                sequential.top_k_by_score(measure, 10)
            );
        }
    }
}
