use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use wordtally_core::config_file;
use wordtally_core::{CorpusAggregator, PdfBackend, TallyConfig, token_frequencies};
use wordtally_pdf_mupdf::MupdfBackend;

mod output;
mod progress;

use output::ColorMode;

/// Word Tally - Count word-list occurrences in PDF documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Comma-separated target words (overrides the config file)
    #[arg(long, global = true, value_delimiter = ',')]
    words: Vec<String>,

    /// Path to a TOML config file (skips the default config lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to output report file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count target words in a single PDF
    Count {
        /// Path to the PDF file
        file_path: PathBuf,
    },

    /// Sum target-word counts over an explicit list of PDFs
    Aggregate {
        /// PDF files, processed in the given order
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Sum target-word counts over every *.pdf file in a directory
    Scan {
        /// Directory to scan (defaults to the configured corpus directory)
        dir: Option<PathBuf>,
    },

    /// Print the single-document and aggregate reports for the configured inputs
    Run,

    /// Print the most frequent lowercase tokens of a PDF
    Tokens {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Number of tokens to show
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Print the effective target word list
    Words,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.words.clone())?;

    let use_color = !cli.no_color && cli.output.is_none();
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = cli.output {
        Box::new(
            std::fs::File::create(output_path)
                .with_context(|| format!("cannot create {}", output_path.display()))?,
        )
    } else {
        Box::new(std::io::stdout())
    };

    let backend = MupdfBackend::new();
    let aggregator = CorpusAggregator::new(&backend, &config.word_list)?;

    match cli.command {
        Command::Count { file_path } => {
            let counts = aggregator.count_document(&file_path)?;
            output::print_counts(&mut writer, &document_label(&file_path), &counts, color)?;
        }
        Command::Aggregate { paths } => {
            let bar = progress::CorpusProgress::new(cli.quiet);
            let totals = aggregator.aggregate_paths(&paths, |e| bar.handle(&e))?;
            bar.finish();
            output::print_aggregate(&mut writer, &corpus_label(paths.len()), &totals, color)?;
        }
        Command::Scan { dir } => {
            let dir = dir.or(config.corpus_dir.clone()).ok_or_else(|| {
                anyhow::anyhow!("No directory given and no [inputs] directory configured")
            })?;
            let bar = progress::CorpusProgress::new(cli.quiet);
            let totals = aggregator.aggregate_directory(&dir, |e| bar.handle(&e))?;
            bar.finish();
            let label = format!("Word counts across PDF documents in {}:", dir.display());
            output::print_aggregate(&mut writer, &label, &totals, color)?;
        }
        Command::Run => run(&aggregator, &config, cli.quiet, &mut writer, color)?,
        Command::Tokens { file_path, top } => {
            let text = backend
                .extract_text(&file_path)
                .with_context(|| format!("failed to read {}", file_path.display()))?;
            let freqs = token_frequencies(&text);
            output::print_tokens(&mut writer, &document_name(&file_path), &freqs, top, color)?;
        }
        Command::Words => output::print_words(&mut writer, aggregator.counter().words())?,
    }

    writer.flush()?;
    Ok(())
}

/// Default invocation: one report for the first configured document, then
/// one summed over every configured document (and the corpus directory, if
/// one is set).
fn run(
    aggregator: &CorpusAggregator<'_>,
    config: &TallyConfig,
    quiet: bool,
    writer: &mut Box<dyn Write>,
    color: ColorMode,
) -> anyhow::Result<()> {
    let Some(first) = config.input_paths.first() else {
        anyhow::bail!(
            "No input paths configured. Add [inputs] paths = [...] to .wordtally.toml or pass --config"
        );
    };

    let single = aggregator.count_document(first)?;
    output::print_counts(writer, &document_label(first), &single, color)?;

    let bar = progress::CorpusProgress::new(quiet);
    let totals = aggregator.aggregate_paths(&config.input_paths, |e| bar.handle(&e))?;
    bar.finish();
    output::print_aggregate(
        writer,
        &corpus_label(config.input_paths.len()),
        &totals,
        color,
    )?;

    if let Some(ref dir) = config.corpus_dir {
        let bar = progress::CorpusProgress::new(quiet);
        let totals = aggregator.aggregate_directory(dir, |e| bar.handle(&e))?;
        bar.finish();
        let label = format!("Word counts across PDF documents in {}:", dir.display());
        output::print_aggregate(writer, &label, &totals, color)?;
    }

    Ok(())
}

/// Resolve configuration: CLI flags > config file > defaults
fn resolve_config(config_path: Option<&Path>, words: Vec<String>) -> anyhow::Result<TallyConfig> {
    let file = match config_path {
        Some(path) => config_file::load_from_path(path).ok_or_else(|| {
            anyhow::anyhow!("Config file missing or invalid: {}", path.display())
        })?,
        None => config_file::load_config(),
    };

    let mut config = file.resolve();
    let words: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();
    if !words.is_empty() {
        config.word_list = words;
    }
    tracing::debug!(
        words = config.word_list.len(),
        inputs = config.input_paths.len(),
        "resolved configuration"
    );
    Ok(config)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn document_label(path: &Path) -> String {
    format!("Word counts in {}:", document_name(path))
}

fn corpus_label(documents: usize) -> String {
    format!("Word counts across {} PDF documents:", documents)
}
