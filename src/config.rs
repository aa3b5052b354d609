//! Analysis configuration, loadable from a JSON file.

use crate::errors::{BigramError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one analysis run. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of every bigram top list.
    pub top_k: usize,
    /// Length of the part-of-speech frequency lists.
    pub pos_top_k: usize,
    /// Tags reported in the part-of-speech section.
    pub pos_tags: Vec<String>,
    /// Characters removed from the raw text before tokenization.
    pub strip_chars: Vec<char>,
    /// Count frequencies on the rayon pool.
    pub parallel_counting: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 20,
            pos_top_k: 10,
            pos_tags: vec!["NOUN".into(), "INFN".into(), "ADJF".into()],
            strip_chars: vec!['`', '\''],
            parallel_counting: false,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(BigramError::Config("top_k must be at least 1".into()));
        }
        if self.pos_top_k == 0 {
            return Err(BigramError::Config("pos_top_k must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"top_k": 5, "pos_tags": ["NOUN"]}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.pos_tags, vec!["NOUN".to_string()]);
        assert_eq!(config.pos_top_k, 10);
        assert_eq!(config.strip_chars, vec!['`', '\'']);
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let config = AnalysisConfig { top_k: 0, ..AnalysisConfig::default() };
        assert!(matches!(config.validate(), Err(BigramError::Config(_))));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AnalysisConfig::from_json_file(file.path()),
            Err(BigramError::Json(_))
        ));
    }
}
