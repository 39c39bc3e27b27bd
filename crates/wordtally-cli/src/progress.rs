use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use wordtally_core::ProgressEvent;

/// Stderr progress bar driven by [`ProgressEvent`]s.
pub struct CorpusProgress {
    bar: ProgressBar,
}

impl CorpusProgress {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("=> "),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        };
        Self { bar }
    }

    pub fn handle(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => self.bar.set_length(*total as u64),
            ProgressEvent::Extracting { path, .. } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.bar.set_message(name);
            }
            ProgressEvent::Counted { .. } => self.bar.inc(1),
        }
    }

    /// Clear the bar so reports start on a clean line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
