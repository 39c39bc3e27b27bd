use std::path::{Path, PathBuf};

use crate::counter::{AggregateCountMap, CountMap, WordCounter};
use crate::{PdfBackend, ProgressEvent, TallyError};

/// List the entries of `dir` whose file name ends in `.pdf`.
///
/// The suffix match is case-sensitive and entries come back in directory
/// listing order. The suffix is tested on the raw name bytes, so a name
/// that is not valid UTF-8 is still listed.
pub fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, TallyError> {
    let dir_err = |source| TallyError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        let name = entry.file_name();
        if name.as_encoded_bytes().ends_with(b".pdf") {
            files.push(entry.path());
        } else {
            tracing::trace!(name = ?name, "skipping non-pdf entry");
        }
    }
    Ok(files)
}

/// Extracts each document through a [`PdfBackend`] and folds its
/// [`CountMap`] into a running total.
///
/// Runs are fail-fast: the first document that cannot be read aborts the
/// run and no aggregate is returned.
pub struct CorpusAggregator<'a> {
    backend: &'a dyn PdfBackend,
    counter: WordCounter,
}

impl<'a> CorpusAggregator<'a> {
    pub fn new<S: AsRef<str>>(
        backend: &'a dyn PdfBackend,
        words: &[S],
    ) -> Result<Self, TallyError> {
        Ok(Self {
            backend,
            counter: WordCounter::new(words)?,
        })
    }

    pub fn counter(&self) -> &WordCounter {
        &self.counter
    }

    /// Extract one document and count the target words in its text.
    pub fn count_document(&self, path: &Path) -> Result<CountMap, TallyError> {
        let text = self
            .backend
            .extract_text(path)
            .map_err(|source| TallyError::DocumentRead {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), chars = text.len(), "extracted text");
        Ok(self.counter.count(&text))
    }

    /// Sum counts over `paths`, in the given order.
    pub fn aggregate_paths(
        &self,
        paths: &[PathBuf],
        progress: impl Fn(ProgressEvent),
    ) -> Result<AggregateCountMap, TallyError> {
        let total = paths.len();
        progress(ProgressEvent::Started { total });

        let mut totals = self.counter.zeroed();
        for (index, path) in paths.iter().enumerate() {
            progress(ProgressEvent::Extracting {
                index,
                total,
                path: path.clone(),
            });
            let counts = self.count_document(path)?;
            let matches = counts.total();
            totals.merge(&counts);
            progress(ProgressEvent::Counted {
                index,
                total,
                path: path.clone(),
                matches,
            });
        }

        tracing::info!(documents = total, matches = totals.total(), "corpus counted");
        Ok(totals)
    }

    /// Sum counts over every `*.pdf` entry in `dir`.
    pub fn aggregate_directory(
        &self,
        dir: &Path,
        progress: impl Fn(ProgressEvent),
    ) -> Result<AggregateCountMap, TallyError> {
        let files = list_pdf_files(dir)?;
        tracing::debug!(dir = %dir.display(), files = files.len(), "scanned directory");
        self.aggregate_paths(&files, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn empty_path_list_yields_zeroed_totals() {
        let backend = MockBackend::new();
        let agg = CorpusAggregator::new(&backend, &words(&["he", "she"])).unwrap();
        let totals = agg.aggregate_paths(&[], |_| {}).unwrap();
        assert_eq!(totals.get("he"), Some(0));
        assert_eq!(totals.get("she"), Some(0));
    }

    #[test]
    fn list_pdf_files_missing_dir_is_error() {
        let err = list_pdf_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, TallyError::Directory { .. }));
    }

    #[test]
    fn list_pdf_files_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.PDF", "c.Pdf", "notes.txt", "d.pdf.bak"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let mut names: Vec<String> = list_pdf_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.pdf"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_pdf_files_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let latin1 = OsStr::from_bytes(b"r\xe9sum\xe9.pdf");
        std::fs::write(dir.path().join(latin1), b"").unwrap();
        std::fs::write(dir.path().join("ok.pdf"), b"").unwrap();
        std::fs::write(dir.path().join(OsStr::from_bytes(b"\xff.txt")), b"").unwrap();

        let files = list_pdf_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.file_name() == Some(latin1)));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_pdf_is_not_silently_dropped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(OsStr::from_bytes(b"\xe9t\xe9.pdf")), b"").unwrap();

        // The mock serves no text for this path, so the run must fail.
        let backend = MockBackend::new();
        let agg = CorpusAggregator::new(&backend, &words(&["he"])).unwrap();
        let err = agg.aggregate_directory(dir.path(), |_| {}).unwrap_err();
        assert!(matches!(err, TallyError::DocumentRead { .. }));
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn progress_events_bracket_each_document() {
        use std::cell::RefCell;

        let backend = MockBackend::new()
            .with_document("one.pdf", "he")
            .with_document("two.pdf", "she she");
        let agg = CorpusAggregator::new(&backend, &words(&["he", "she"])).unwrap();
        let seen = RefCell::new(Vec::new());
        let paths = [PathBuf::from("one.pdf"), PathBuf::from("two.pdf")];
        agg.aggregate_paths(&paths, |event| seen.borrow_mut().push(event))
            .unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 5);
        assert!(matches!(seen[0], ProgressEvent::Started { total: 2 }));
        assert!(matches!(
            seen[2],
            ProgressEvent::Counted {
                index: 0,
                matches: 1,
                ..
            }
        ));
        assert!(matches!(
            seen[4],
            ProgressEvent::Counted {
                index: 1,
                matches: 2,
                ..
            }
        ));
    }
}
