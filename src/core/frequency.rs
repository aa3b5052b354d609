// File: src/core/frequency.rs
use crate::core::corpus::{Corpus, Sentence};
use crate::core::types::{Bigram, Lemma};
use rayon::prelude::*;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Sentences per rayon task when counting in parallel.
const PARALLEL_CHUNK: usize = 256;

/// Occurrence counts that also remember the order in which keys were first seen.
/// The order is what makes rankings with tied scores reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K: Eq + Hash> {
    counts: HashMap<K, u64>,
    order: Vec<K>,
}

pub type UnigramFrequencyTable = FrequencyTable<Lemma>;
pub type BigramFrequencyTable = FrequencyTable<Bigram>;

impl<K: Eq + Hash> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self { counts: HashMap::new(), order: Vec::new() }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    /// Adds `n` occurrences. Zero never creates an entry.
    pub fn add_count(&mut self, key: K, n: u64) {
        if n == 0 {
            return;
        }
        match self.counts.get_mut(&key) {
            Some(count) => *count += n,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, n);
            }
        }
    }

    /// Count for `key`; absent keys count 0.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.order.iter().map(move |key| (key, self.counts[key]))
    }

    /// Sums `other` into `self`. Keys new to `self` are appended in `other`'s order,
    /// so merging partial tables left to right reproduces sequential counting.
    pub fn merge(&mut self, other: Self) {
        let FrequencyTable { counts, order } = other;
        for key in order {
            let n = counts[&key];
            self.add_count(key, n);
        }
    }
}

/// Counts every lemma of the flattened corpus.
pub fn count_unigrams(corpus: &Corpus) -> UnigramFrequencyTable {
    count_unigrams_in(corpus.sentences())
}

fn count_unigrams_in(sentences: &[Sentence]) -> UnigramFrequencyTable {
    let mut table = UnigramFrequencyTable::new();
    for lemma in sentences.iter().flat_map(|s| s.lemmas()) {
        table.add(lemma.clone());
    }
    table
}

/// Adjacent lemma pairs of one sentence, left to right. n lemmas give n-1 pairs.
pub fn sentence_bigrams(sentence: &Sentence) -> impl Iterator<Item = Bigram> + '_ {
    sentence
        .lemmas()
        .windows(2)
        .map(|pair| Bigram::new(pair[0].clone(), pair[1].clone()))
}

/// All bigrams in sentence order, never crossing a sentence boundary.
pub fn extract_bigrams(corpus: &Corpus) -> Vec<Bigram> {
    corpus.sentences().iter().flat_map(sentence_bigrams).collect()
}

pub fn count_bigrams<I>(bigrams: I) -> BigramFrequencyTable
where
    I: IntoIterator<Item = Bigram>,
{
    let mut table = BigramFrequencyTable::new();
    for bigram in bigrams {
        table.add(bigram);
    }
    table
}

/// Counts both tables over sentence chunks on the rayon pool and merges the
/// partial tables in sentence order. Produces the same tables as the sequential path.
pub fn count_parallel(corpus: &Corpus) -> (UnigramFrequencyTable, BigramFrequencyTable) {
    corpus
        .sentences()
        .par_chunks(PARALLEL_CHUNK)
        .map(|chunk| {
            let unigrams = count_unigrams_in(chunk);
            let bigrams = count_bigrams(chunk.iter().flat_map(sentence_bigrams));
            (unigrams, bigrams)
        })
        .reduce(
            || (UnigramFrequencyTable::new(), BigramFrequencyTable::new()),
            |(mut uni_a, mut bi_a), (uni_b, bi_b)| {
                uni_a.merge(uni_b);
                bi_a.merge(bi_b);
                (uni_a, bi_a)
            },
        )
}
