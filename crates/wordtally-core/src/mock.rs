//! In-memory backend for testing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{DocumentReadError, PdfBackend};

#[derive(Clone, Debug)]
enum MockDocument {
    Text(String),
    Corrupt(String),
}

/// A hand-rolled [`PdfBackend`] that serves canned text per path.
///
/// Unknown paths fail with [`DocumentReadError::OpenError`], as a missing
/// file would. Every call is recorded, in order, for
/// [`calls()`](MockBackend::calls).
#[derive(Default)]
pub struct MockBackend {
    documents: HashMap<PathBuf, MockDocument>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `path`.
    pub fn with_document(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.documents
            .insert(path.into(), MockDocument::Text(text.into()));
        self
    }

    /// Fail extraction of `path` as a malformed PDF would.
    pub fn with_corrupt(mut self, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        self.documents
            .insert(path.into(), MockDocument::Corrupt(reason.into()));
        self
    }

    /// Paths passed to `extract_text`, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl PdfBackend for MockBackend {
    fn extract_text(&self, path: &Path) -> Result<String, DocumentReadError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.to_path_buf());
        }
        match self.documents.get(path) {
            Some(MockDocument::Text(text)) => Ok(text.clone()),
            Some(MockDocument::Corrupt(reason)) => {
                Err(DocumentReadError::ExtractionError(reason.clone()))
            }
            None => Err(DocumentReadError::OpenError(format!(
                "no such document: {}",
                path.display()
            ))),
        }
    }
}
