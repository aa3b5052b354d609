// File: src/core/ranking.rs
use crate::core::corpus::Corpus;
use crate::core::frequency::{BigramFrequencyTable, UnigramFrequencyTable};
use crate::core::scorer::ScoreTable;
use crate::core::types::{Bigram, Lemma, Measure};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

/// A lemma of one part of speech with its absolute and relative frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct PosFrequency {
    pub lemma: Lemma,
    pub count: u64,
    /// `count` over the number of lemmas carrying the same tag.
    pub relative: f64,
}

/// Scores a ranking can order by.
trait RankScore: Copy {
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl RankScore for f64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl RankScore for u64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Greater means ranked higher: larger score first, then earlier first-seen position.
#[derive(Clone, Copy)]
struct Candidate<S> {
    score: S,
    seq: usize,
}

impl<S: RankScore> PartialEq for Candidate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: RankScore> Eq for Candidate<S> {}

impl<S: RankScore> PartialOrd for Candidate<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: RankScore> Ord for Candidate<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .rank_cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Keeps the best `k` candidates in a min-heap and returns them best first.
/// O(n log k).
fn select_top_k<S, I>(candidates: I, k: usize) -> Vec<(usize, S)>
where
    S: RankScore,
    I: IntoIterator<Item = (usize, S)>,
{
    if k == 0 {
        return vec![];
    }

    // Grows with the candidates; `k` may be far larger than their count.
    let mut heap: BinaryHeap<Reverse<Candidate<S>>> = BinaryHeap::new();
    for (seq, score) in candidates {
        let candidate = Candidate { score, seq };
        if heap.len() < k {
            heap.push(Reverse(candidate));
        } else if let Some(Reverse(worst)) = heap.peek() {
            if candidate > *worst {
                heap.pop();
                heap.push(Reverse(candidate));
            }
        }
    }

    // Ascending order of Reverse is descending order of the candidates.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(c)| (c.seq, c.score))
        .collect()
}

/// Read-only queries over already computed tables.
pub struct Ranker<'a> {
    corpus: &'a Corpus,
    unigrams: &'a UnigramFrequencyTable,
    bigrams: &'a BigramFrequencyTable,
    scores: &'a ScoreTable,
}

impl<'a> Ranker<'a> {
    pub fn new(
        corpus: &'a Corpus,
        unigrams: &'a UnigramFrequencyTable,
        bigrams: &'a BigramFrequencyTable,
        scores: &'a ScoreTable,
    ) -> Self {
        Self { corpus, unigrams, bigrams, scores }
    }

    /// Corpus-wide count of a lemma, 0 if unseen.
    pub fn word_frequency(&self, lemma: &str) -> u64 {
        self.unigrams.get(lemma)
    }

    pub fn bigram_frequency(&self, bigram: &Bigram) -> u64 {
        self.bigrams.get(bigram)
    }

    /// All distinct bigrams by `measure`, descending, at most `k`.
    pub fn top_k_by_score(&self, measure: Measure, k: usize) -> Vec<(Bigram, f64)> {
        self.rank_scores(measure, k, |_| true)
    }

    /// Like [`Ranker::top_k_by_score`] but only bigrams having `word` as either lemma.
    pub fn top_k_by_score_containing(
        &self,
        measure: Measure,
        word: &str,
        k: usize,
    ) -> Vec<(Bigram, f64)> {
        self.rank_scores(measure, k, |bigram| bigram.contains(word))
    }

    /// Bigrams having `word` as either lemma, by raw occurrence count.
    pub fn top_k_raw_frequency_containing(&self, word: &str, k: usize) -> Vec<(Bigram, u64)> {
        let entries: Vec<(&Bigram, u64)> = self.bigrams.iter().collect();
        let candidates = entries
            .iter()
            .enumerate()
            .filter(|(_, (bigram, _))| bigram.contains(word))
            .map(|(seq, &(_, count))| (seq, count));

        select_top_k(candidates, k)
            .into_iter()
            .map(|(seq, count)| (entries[seq].0.clone(), count))
            .collect()
    }

    /// Most frequent lemmas tagged `pos`, with frequencies relative to all lemmas of that tag.
    pub fn pos_frequencies(&self, pos: &str, k: usize) -> Vec<PosFrequency> {
        let mut order: Vec<&Lemma> = Vec::new();
        let mut counts: HashMap<&Lemma, u64> = HashMap::new();
        for sentence in self.corpus.sentences() {
            for (lemma, tag) in sentence.tagged_lemmas() {
                if tag.map(|t| t.as_str()) != Some(pos) {
                    continue;
                }
                let count = counts.entry(lemma).or_insert_with(|| {
                    order.push(lemma);
                    0
                });
                *count += 1;
            }
        }

        let total: u64 = counts.values().sum();
        let candidates = order.iter().enumerate().map(|(seq, lemma)| (seq, counts[lemma]));
        select_top_k(candidates, k)
            .into_iter()
            .map(|(seq, count)| PosFrequency {
                lemma: order[seq].clone(),
                count,
                relative: count as f64 / total as f64,
            })
            .collect()
    }

    fn rank_scores<F>(&self, measure: Measure, k: usize, keep: F) -> Vec<(Bigram, f64)>
    where
        F: Fn(&Bigram) -> bool,
    {
        let entries: Vec<_> = self.scores.iter().collect();
        let candidates = entries
            .iter()
            .enumerate()
            .filter(|(_, (bigram, _))| keep(*bigram))
            .map(|(seq, (_, score))| (seq, score.get(measure)));

        select_top_k(candidates, k)
            .into_iter()
            .map(|(seq, score)| (entries[seq].0.clone(), score))
            .collect()
    }
}
