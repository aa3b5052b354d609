// File: src/persistence.rs
use crate::core::corpus::Corpus;
use crate::errors::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Bumped whenever the cached layout changes; older caches are ignored.
const CACHE_VERSION: u32 = 1;

#[derive(serde::Serialize, serde::Deserialize)]
struct CorpusCache {
    version: u32,
    corpus: Corpus,
}

/// Writes into a temp file next to `path`, then renames it over `path`.
fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Saves a lemmatized corpus so later runs can skip the lemmatizer.
pub fn save_corpus_cache(corpus: &Corpus, path: &Path) -> Result<()> {
    let cache = CorpusCache { version: CACHE_VERSION, corpus: corpus.clone() };
    write_atomic(path, |writer| {
        bincode::serialize_into(writer, &cache)?;
        Ok(())
    })
}

/// Loads a cached corpus. `Ok(None)` when the file is missing or was written
/// by another cache version.
pub fn load_corpus_cache(path: &Path) -> Result<Option<Corpus>> {
    if !path.exists() {
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    let cache: CorpusCache = bincode::deserialize_from(reader)?;
    if cache.version != CACHE_VERSION {
        debug!(found = cache.version, expected = CACHE_VERSION, "ignoring stale corpus cache");
        return Ok(None);
    }
    debug!(path = %path.display(), sentences = cache.corpus.len(), "corpus cache hit");
    Ok(Some(cache.corpus))
}

/// Atomically replaces `path` with `contents`. Used for the lemma dump and the analysis log.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    write_atomic(path, |writer| {
        writer.write_all(contents.as_bytes())?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corpus::CorpusToken;
    use crate::core::types::PosTag;

    #[test]
    fn test_cache_round_trip_keeps_tags_and_punctuation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("corpus.bin");
        let corpus = Corpus::from_sentences(vec![
            vec![
                CorpusToken::tagged("кот", PosTag::new("NOUN")),
                CorpusToken::punctuation(","),
                CorpusToken::word("сидеть"),
            ],
            vec![],
        ]);

        save_corpus_cache(&corpus, &path).unwrap();
        let loaded = load_corpus_cache(&path).unwrap();
        assert_eq!(loaded, Some(corpus));
    }

    #[test]
    fn test_missing_cache_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_corpus_cache(&dir.path().join("absent.bin")).unwrap(), None);
    }

    #[test]
    fn test_write_text_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        write_text(&path, "first").unwrap();
        write_text(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }
}
