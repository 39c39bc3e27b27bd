use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod aggregate;
pub mod backend;
pub mod config_file;
pub mod counter;
pub mod mock;
pub mod text_processing;
pub mod tokens;

pub use aggregate::{CorpusAggregator, list_pdf_files};
pub use backend::{DocumentReadError, PdfBackend};
pub use counter::{AggregateCountMap, CountMap, WordCounter, count_words};
pub use tokens::{TokenFrequencies, token_frequencies};

/// Built-in target vocabulary, used when no word list is configured.
pub const DEFAULT_WORDS: [&str; 20] = [
    "male", "female", "mr", "ms", "boy", "girl", "father", "mother", "brother", "sister",
    "husband", "wife", "man", "woman", "he", "she", "son", "daughter", "uncle", "aunt",
];

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("failed to read {}: {source}", .path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: DocumentReadError,
    },
    #[error("failed to list directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pattern for word {word:?}: {source}")]
    Pattern {
        word: String,
        #[source]
        source: regex::Error,
    },
}

/// Pipeline inputs: what to count and where to look.
#[derive(Debug, Clone)]
pub struct TallyConfig {
    pub word_list: Vec<String>,
    /// Explicit documents, processed in the given order.
    pub input_paths: Vec<PathBuf>,
    /// Directory scanned for `*.pdf` entries.
    pub corpus_dir: Option<PathBuf>,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            word_list: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            input_paths: Vec::new(),
            corpus_dir: None,
        }
    }
}

/// Progress events emitted while a corpus is being counted.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A run over `total` documents is about to start.
    Started { total: usize },
    /// Text extraction for one document is starting.
    Extracting {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    /// One document was counted; `matches` is the sum over all target words.
    Counted {
        index: usize,
        total: usize,
        path: PathBuf,
        matches: u64,
    },
}

/// Count the target words in a single document.
pub fn count_document(
    path: &Path,
    words: &[String],
    backend: &dyn PdfBackend,
) -> Result<CountMap, TallyError> {
    CorpusAggregator::new(backend, words)?.count_document(path)
}

/// Sum target-word counts over an explicit list of documents.
///
/// The first document that fails to extract aborts the run.
pub fn aggregate_paths(
    paths: &[PathBuf],
    words: &[String],
    backend: &dyn PdfBackend,
) -> Result<AggregateCountMap, TallyError> {
    CorpusAggregator::new(backend, words)?.aggregate_paths(paths, |_| {})
}

/// Sum target-word counts over every `*.pdf` entry of `dir`.
///
/// The suffix check is case-sensitive, so `report.PDF` is skipped.
pub fn aggregate_directory(
    dir: &Path,
    words: &[String],
    backend: &dyn PdfBackend,
) -> Result<AggregateCountMap, TallyError> {
    CorpusAggregator::new(backend, words)?.aggregate_directory(dir, |_| {})
}
