// File: src/core/scorer.rs
use crate::core::frequency::{BigramFrequencyTable, UnigramFrequencyTable};
use crate::core::types::{AssociationScore, Bigram};
use std::collections::HashMap;
use tracing::warn;

/// Dice coefficient: `2 * joint / (freq1 + freq2)`, 0 when both frequencies are 0.
pub fn dice(joint: u64, freq1: u64, freq2: u64) -> f64 {
    let denominator = freq1 + freq2;
    if denominator == 0 {
        return 0.0;
    }
    2.0 * joint as f64 / denominator as f64
}

/// PMI-style score: `log2(corpus_size * joint / (freq1 * freq2))`.
/// A zero product or a non-positive argument scores 0.
pub fn mi(joint: u64, freq1: u64, freq2: u64, corpus_size: usize) -> f64 {
    let product = freq1 as f64 * freq2 as f64;
    if product == 0.0 {
        return 0.0;
    }
    let ratio = corpus_size as f64 * joint as f64 / product;
    if ratio <= 0.0 || !ratio.is_finite() {
        return 0.0;
    }
    ratio.log2()
}

/// Scores for every distinct bigram, in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreTable {
    entries: Vec<(Bigram, AssociationScore)>,
    index: HashMap<Bigram, usize>,
    inconsistencies: usize,
}

impl ScoreTable {
    pub fn get(&self, bigram: &Bigram) -> Option<AssociationScore> {
        self.index.get(bigram).map(|&i| self.entries[i].1)
    }

    /// Entries in the order the bigrams were first seen in the corpus.
    pub fn iter(&self) -> impl Iterator<Item = (&Bigram, AssociationScore)> + '_ {
        self.entries.iter().map(|(bigram, score)| (bigram, *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bigrams whose constituent word counts were missing from the unigram table.
    /// Always 0 when both tables come from the same corpus.
    pub fn inconsistencies(&self) -> usize {
        self.inconsistencies
    }
}

/// Computes Dice and MI once per distinct bigram.
pub struct AssociationScorer {
    corpus_size: usize,
}

impl AssociationScorer {
    /// `corpus_size` normalizes MI; the engine passes the distinct sentence count.
    pub fn new(corpus_size: usize) -> Self {
        Self { corpus_size }
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    /// Pure function of its inputs: scoring unchanged tables twice gives identical results.
    pub fn score(
        &self,
        unigrams: &UnigramFrequencyTable,
        bigrams: &BigramFrequencyTable,
    ) -> ScoreTable {
        let mut table = ScoreTable {
            entries: Vec::with_capacity(bigrams.len()),
            index: HashMap::with_capacity(bigrams.len()),
            inconsistencies: 0,
        };

        for (bigram, joint) in bigrams.iter() {
            let freq1 = unigrams.get(bigram.first.as_str());
            let freq2 = unigrams.get(bigram.second.as_str());
            if freq1 == 0 || freq2 == 0 {
                table.inconsistencies += 1;
            }

            let score = AssociationScore {
                dice: dice(joint, freq1, freq2),
                mi: mi(joint, freq1, freq2, self.corpus_size),
            };
            table.index.insert(bigram.clone(), table.entries.len());
            table.entries.push((bigram.clone(), score));
        }

        if table.inconsistencies > 0 {
            warn!(
                count = table.inconsistencies,
                "bigrams reference words missing from the unigram table; their scores fall back to 0"
            );
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corpus::Corpus;
    use crate::core::frequency::{count_bigrams, count_unigrams, extract_bigrams};

    #[test]
    fn test_dice_values() {
        assert_eq!(dice(2, 2, 2), 1.0);
        assert_eq!(dice(1, 2, 1), 2.0 / 3.0);
        assert_eq!(dice(3, 0, 0), 0.0);
    }

    #[test]
    fn test_mi_values() {
        // log2(4 * 2 / (2 * 2)) = 1
        assert!((mi(2, 2, 2, 4) - 1.0).abs() < 1e-12);
        assert_eq!(mi(1, 0, 5, 10), 0.0);
        assert_eq!(mi(1, 1, 1, 0), 0.0);
        assert!(mi(1, 4, 4, 2) < 0.0);
    }

    #[test]
    fn test_scores_for_cat_corpus() {
        let corpus = Corpus::from_lemmas(vec![vec!["the", "cat", "sat"], vec!["the", "cat", "ran"]]);
        let unigrams = count_unigrams(&corpus);
        let bigrams = count_bigrams(extract_bigrams(&corpus));
        let scores = AssociationScorer::new(corpus.distinct_sentence_count()).score(&unigrams, &bigrams);

        let the_cat = scores.get(&Bigram::new("the", "cat")).unwrap();
        assert_eq!(the_cat.dice, 1.0);
        // log2(2 * 2 / (2 * 2)) = 0
        assert_eq!(the_cat.mi, 0.0);

        let cat_sat = scores.get(&Bigram::new("cat", "sat")).unwrap();
        assert_eq!(cat_sat.dice, 2.0 / 3.0);
        assert!((cat_sat.mi - 0.0).abs() < 1e-12);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.inconsistencies(), 0);
    }

    #[test]
    fn test_inconsistent_tables_score_zero() {
        let unigrams = UnigramFrequencyTable::new();
        let bigrams = count_bigrams(vec![Bigram::new("ghost", "word")]);
        let scores = AssociationScorer::new(3).score(&unigrams, &bigrams);

        let score = scores.get(&Bigram::new("ghost", "word")).unwrap();
        assert_eq!(score.dice, 0.0);
        assert_eq!(score.mi, 0.0);
        assert_eq!(scores.inconsistencies(), 1);
    }

    #[test]
    fn test_rescoring_is_bit_identical() {
        let corpus = Corpus::from_lemmas(vec![vec!["a", "b", "c", "a", "b"], vec!["b", "c"]]);
        let unigrams = count_unigrams(&corpus);
        let bigrams = count_bigrams(extract_bigrams(&corpus));
        let scorer = AssociationScorer::new(corpus.distinct_sentence_count());

        let first = scorer.score(&unigrams, &bigrams);
        let second = scorer.score(&unigrams, &bigrams);
        for ((b1, s1), (b2, s2)) in first.iter().zip(second.iter()) {
            assert_eq!(b1, b2);
            assert_eq!(s1.dice.to_bits(), s2.dice.to_bits());
            assert_eq!(s1.mi.to_bits(), s2.mi.to_bits());
        }
    }
}
