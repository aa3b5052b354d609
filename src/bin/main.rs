use bigram_core::nlp::{LexiconAnalyzer, PipelineBackend};
use bigram_core::persistence::{load_corpus_cache, save_corpus_cache, write_text};
use bigram_core::report::{build_report, parse_words, render_plain, Section};
use bigram_core::{AnalysisConfig, BigramAnalyzer};
use clap::Parser;
use crossterm::style::Stylize;
use std::io::{stdout, Write};
use std::path::PathBuf;
use tracing::info;

/// Bigram collocation analysis of a text file.
#[derive(Parser, Debug)]
#[command(name = "bigrammer", about = "Bigram analysis of a given text")]
struct Cli {
    /// Path to the .txt file to analyze
    text: PathBuf,
    /// Words separated by | (word1|word2|...) for per-word bigram lists
    #[arg(long, default_value = "")]
    words: String,
    /// Save the lemmatized text, one sentence per line
    #[arg(long)]
    lemma_out: Option<PathBuf>,
    /// Write the analysis report as plain text
    #[arg(long)]
    log: Option<PathBuf>,
    /// Path to config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tab-separated lexicon: form, lemma, optional POS tag
    #[arg(long)]
    lexicon: Option<PathBuf>,
    /// Fail on words missing from the lexicon instead of lowercasing them
    #[arg(long)]
    strict: bool,
    /// Reuse (or create) a binary cache of the lemmatized corpus
    #[arg(long)]
    cache: Option<PathBuf>,
    /// Override the length of the bigram top lists
    #[arg(long)]
    top_k: Option<usize>,
    /// Count frequencies in parallel
    #[arg(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(top_k) = cli.top_k {
        config.top_k = top_k;
    }
    config.parallel_counting |= cli.parallel;
    config.validate()?;

    let analyzer = analyze(&cli, &config)?;

    if let Some(path) = &cli.lemma_out {
        write_text(path, &analyzer.corpus().lemma_text())?;
        info!(path = %path.display(), "lemmatized text saved");
    }

    let words = parse_words(&cli.words);
    let sections = build_report(&analyzer, &config, &words);
    print_report(&sections)?;

    if let Some(path) = &cli.log {
        write_text(path, &render_plain(&sections))?;
        info!(path = %path.display(), "analysis log saved");
    }
    Ok(())
}

fn analyze(cli: &Cli, config: &AnalysisConfig) -> anyhow::Result<BigramAnalyzer> {
    if let Some(cache) = &cli.cache {
        if let Some(corpus) = load_corpus_cache(cache)? {
            info!(path = %cache.display(), "using cached lemmatized corpus");
            return Ok(BigramAnalyzer::with_config(corpus, config));
        }
    }

    let analyzer = match &cli.lexicon {
        Some(path) => LexiconAnalyzer::from_tsv_path(path)?,
        None => LexiconAnalyzer::new(),
    }
    .strict(cli.strict);
    info!(entries = analyzer.len(), strict = cli.strict, "lexicon loaded");

    let text = std::fs::read_to_string(&cli.text)?;
    let backend = PipelineBackend::new(analyzer, config);
    let result = BigramAnalyzer::from_text(&text, &backend, config)?;

    if let Some(cache) = &cli.cache {
        save_corpus_cache(result.corpus(), cache)?;
        info!(path = %cache.display(), "lemmatized corpus cached");
    }
    Ok(result)
}

fn print_report(sections: &[Section]) -> std::io::Result<()> {
    let mut out = stdout().lock();
    for section in sections {
        writeln!(out, "{}", section.title.as_str().bold().cyan())?;
        if section.lines.is_empty() {
            writeln!(out, "{}", "(no entries)".dark_grey())?;
        }
        for line in &section.lines {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "{}\n", bigram_core::report::RULE.dark_grey())?;
    }
    out.flush()
}
