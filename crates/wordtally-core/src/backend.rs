use std::path::Path;

use thiserror::Error;

/// Why a document's text could not be read. Any of these aborts a corpus run.
#[derive(Error, Debug)]
pub enum DocumentReadError {
    /// The file is not a parseable PDF, or its path cannot be handed to the reader.
    #[error("not a readable PDF: {0}")]
    OpenError(String),
    /// The PDF opened but a page's text layer could not be decoded.
    #[error("text extraction failed: {0}")]
    ExtractionError(String),
    /// The file is missing or unreadable.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of document text for the word counter.
///
/// `extract_text` returns every page's text joined in page order, with
/// enough whitespace between lines that words never run together.
pub trait PdfBackend: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, DocumentReadError>;
}
