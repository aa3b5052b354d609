//! Text reports over a finished analysis.
//!
//! The engine only answers queries; this module decides how the answers are
//! laid out for the console and the analysis log.

use crate::config::AnalysisConfig;
use crate::core::engine::BigramAnalyzer;
use crate::core::types::Measure;

/// Closes every section.
pub const RULE: &str = "----------------------------------------------------------";

/// A titled, numbered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

impl Section {
    fn numbered<I>(title: String, items: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let lines = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect();
        Self { title, lines }
    }

    pub fn to_plain_text(&self) -> String {
        let mut text = format!("{}\n", self.title);
        if self.lines.is_empty() {
            text.push_str("(no entries)\n");
        }
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(RULE);
        text.push('\n');
        text
    }
}

/// Splits the `word1|word2|...` list given on the command line.
pub fn parse_words(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

pub fn pos_section(analyzer: &BigramAnalyzer, pos: &str, k: usize) -> Section {
    Section::numbered(
        format!("Lemmas tagged {}: frequency, relative frequency (top {})", pos, k),
        analyzer
            .pos_frequencies(pos, k)
            .into_iter()
            .map(|f| format!("{} {} {:.2}", f.lemma, f.count, f.relative)),
    )
}

pub fn measure_section(analyzer: &BigramAnalyzer, measure: Measure, k: usize) -> Section {
    Section::numbered(
        format!("Most stable bigrams by {} (top {})", measure, k),
        analyzer
            .top_k_by_score(measure, k)
            .into_iter()
            .map(|(bigram, score)| format!("{} {:.4}", bigram, score)),
    )
}

pub fn measure_by_word_section(
    analyzer: &BigramAnalyzer,
    measure: Measure,
    word: &str,
    k: usize,
) -> Section {
    Section::numbered(
        format!("Most stable bigrams by {} with '{}' (top {})", measure, word, k),
        analyzer
            .top_k_by_score_containing(measure, word, k)
            .into_iter()
            .map(|(bigram, score)| format!("{} {:.4}", bigram, score)),
    )
}

pub fn frequency_by_word_section(analyzer: &BigramAnalyzer, word: &str, k: usize) -> Section {
    Section::numbered(
        format!(
            "Most frequent bigrams with '{}' (top {}, word frequency {})",
            word,
            k,
            analyzer.word_frequency(word)
        ),
        analyzer
            .top_k_raw_frequency_containing(word, k)
            .into_iter()
            .map(|(bigram, count)| format!("{} {}", bigram, count)),
    )
}

/// Every section of the standard analysis, in reading order: part-of-speech
/// lists, global Dice and MI lists, then raw/Dice/MI lists per requested word.
pub fn build_report(
    analyzer: &BigramAnalyzer,
    config: &AnalysisConfig,
    words: &[String],
) -> Vec<Section> {
    let mut sections = Vec::new();
    for pos in &config.pos_tags {
        sections.push(pos_section(analyzer, pos, config.pos_top_k));
    }
    for measure in Measure::ALL {
        sections.push(measure_section(analyzer, measure, config.top_k));
    }
    for word in words {
        sections.push(frequency_by_word_section(analyzer, word, config.top_k));
        for measure in Measure::ALL {
            sections.push(measure_by_word_section(analyzer, measure, word, config.top_k));
        }
    }
    sections
}

/// The whole report as plain text, as written to the analysis log.
pub fn render_plain(sections: &[Section]) -> String {
    sections.iter().map(Section::to_plain_text).collect()
}
