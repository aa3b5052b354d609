// File: src/nlp/tokenizer.rs
use unicode_segmentation::UnicodeSegmentation;

/// Sentence and word splitter over Unicode text segmentation (UAX #29).
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn is_word(segment: &str) -> bool {
        segment.chars().any(char::is_alphanumeric)
    }

    /// Sentences on Unicode sentence boundaries, trimmed. Blank pieces are dropped.
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Words on Unicode word boundaries, so combining marks stay inside their
    /// word. A hyphen directly between two words joins them ("кто-то"). Every
    /// other non-whitespace segment is a punctuation token.
    pub fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        let segments: Vec<(usize, &str)> = sentence.split_word_bound_indices().collect();
        let mut tokens = Vec::new();
        let mut last_word_start = 0;
        let mut joining = false;

        for (i, &(offset, segment)) in segments.iter().enumerate() {
            if Self::is_word(segment) {
                if joining {
                    tokens.pop();
                    tokens.push(&sentence[last_word_start..offset + segment.len()]);
                    joining = false;
                } else {
                    last_word_start = offset;
                    tokens.push(segment);
                }
                continue;
            }

            joining = segment == "-"
                && i > 0
                && Self::is_word(segments[i - 1].1)
                && segments.get(i + 1).map_or(false, |&(_, next)| Self::is_word(next));
            if !joining && !segment.trim().is_empty() {
                tokens.push(segment);
            }
        }
        tokens
    }
}

impl Default for RuleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_split() {
        let tokenizer = RuleTokenizer::new();
        let sentences = tokenizer.sentences("Кот сидел. Кот бежал!  Где он?! Вот 3.5 кг");
        assert_eq!(sentences, vec!["Кот сидел.", "Кот бежал!", "Где он?!", "Вот 3.5 кг"]);
    }

    #[test]
    fn test_blank_text_has_no_sentences() {
        let tokenizer = RuleTokenizer::new();
        assert!(tokenizer.sentences("   \n\t ").is_empty());
        assert!(tokenizer.sentences("").is_empty());
    }

    #[test]
    fn test_word_split() {
        let tokenizer = RuleTokenizer::new();
        let words = tokenizer.words("Кто-то, сказал: «привет»...");
        assert_eq!(
            words,
            vec!["Кто-то", ",", "сказал", ":", "«", "привет", "»", ".", ".", "."]
        );
    }

    #[test]
    fn test_dangling_hyphen_is_punctuation() {
        let tokenizer = RuleTokenizer::new();
        assert_eq!(tokenizer.words("well- done"), vec!["well", "-", "done"]);
    }

    #[test]
    fn test_combining_marks_stay_in_words() {
        let tokenizer = RuleTokenizer::new();
        assert_eq!(tokenizer.words("नमस्ते दुनिया"), vec!["नमस्ते", "दुनिया"]);
        // "мой" with a decomposed short i
        assert_eq!(tokenizer.words("мои\u{306} кот"), vec!["мои\u{306}", "кот"]);
    }
}
