use std::path::Path;

use mupdf::{Document, TextPageFlags};

use wordtally_core::text_processing::expand_ligatures;
use wordtally_core::{DocumentReadError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) from the counting
/// code. Text is read block by block and line by line; every line ends
/// with `\n`, so words never fuse across lines or page breaks. A page with
/// no text layer contributes nothing. Ligatures are expanded.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, DocumentReadError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| DocumentReadError::OpenError("invalid path encoding".into()))?;

        // mupdf reports a missing file as a generic open failure
        if !path.exists() {
            return Err(DocumentReadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let document =
            Document::open(path_str).map_err(|e| DocumentReadError::OpenError(e.to_string()))?;

        let mut text = String::new();
        let mut page_count = 0usize;

        for page_result in document
            .pages()
            .map_err(|e| DocumentReadError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| DocumentReadError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| DocumentReadError::ExtractionError(e.to_string()))?;

            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    text.push_str(&line_text);
                    text.push('\n');
                }
            }
            page_count += 1;
        }

        tracing::debug!(path = %path.display(), pages = page_count, "extracted pdf text");

        // Expand typographic ligatures (ﬁ → fi, ﬂ → fl, etc.)
        Ok(expand_ligatures(&text))
    }
}
