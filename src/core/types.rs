// File: src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized word form as produced by the lemmatizer.
/// Opaque to the engine beyond equality and hashing.
pub type Lemma = String;

/// A part-of-speech tag reported by the morphological analyzer (e.g. "NOUN").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosTag(String);

impl PosTag {
    /// Tag the analyzer assigns to punctuation tokens.
    pub const PUNCTUATION: &'static str = "PNCT";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two lemmas adjacent within one sentence, in reading order.
/// Kept as a pair so a lemma containing whitespace cannot collide with another key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bigram {
    pub first: Lemma,
    pub second: Lemma,
}

impl Bigram {
    pub fn new(first: impl Into<Lemma>, second: impl Into<Lemma>) -> Self {
        Self { first: first.into(), second: second.into() }
    }

    /// Whole-lemma match on either position.
    pub fn contains(&self, lemma: &str) -> bool {
        self.first == lemma || self.second == lemma
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Association measure used to rank bigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Dice,
    Mi,
}

impl Measure {
    pub const ALL: [Measure; 2] = [Measure::Dice, Measure::Mi];

    pub fn name(self) -> &'static str {
        match self {
            Measure::Dice => "Dice",
            Measure::Mi => "MI",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dice" => Ok(Measure::Dice),
            "mi" | "pmi" => Ok(Measure::Mi),
            other => Err(format!("unknown association measure '{}'", other)),
        }
    }
}

/// Both association scores of a single bigram.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssociationScore {
    pub dice: f64,
    pub mi: f64,
}

impl AssociationScore {
    pub fn get(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Dice => self.dice,
            Measure::Mi => self.mi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigram_contains_is_whole_lemma() {
        let bigram = Bigram::new("черный", "кот");
        assert!(bigram.contains("кот"));
        assert!(bigram.contains("черный"));
        assert!(!bigram.contains("ко"));
        assert!(!bigram.contains("черный кот"));
    }

    #[test]
    fn test_bigram_pair_keys_do_not_collide() {
        let a = Bigram::new("new york", "city");
        let b = Bigram::new("new", "york city");
        assert_ne!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_measure_parsing() {
        assert_eq!("dice".parse::<Measure>(), Ok(Measure::Dice));
        assert_eq!("MI".parse::<Measure>(), Ok(Measure::Mi));
        assert!("t-score".parse::<Measure>().is_err());
    }

    #[test]
    fn test_score_lookup_by_measure() {
        let score = AssociationScore { dice: 0.5, mi: 3.0 };
        assert_eq!(score.get(Measure::Dice), 0.5);
        assert_eq!(score.get(Measure::Mi), 3.0);
    }
}
