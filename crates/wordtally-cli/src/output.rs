use std::io::Write;

use owo_colors::OwoColorize;
use wordtally_core::{CountMap, TokenFrequencies};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a label line followed by the counts as a mapping literal.
pub fn print_counts(
    w: &mut dyn Write,
    label: &str,
    counts: &CountMap,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", label.bold())?;
    } else {
        writeln!(w, "{}", label)?;
    }
    writeln!(w, "{}", counts)?;
    Ok(())
}

/// Print a corpus total, highest count first.
pub fn print_aggregate(
    w: &mut dyn Write,
    label: &str,
    totals: &CountMap,
    color: ColorMode,
) -> std::io::Result<()> {
    print_counts(w, label, &totals.ranked(), color)
}

/// Print the `top` most frequent tokens, one per line.
pub fn print_tokens(
    w: &mut dyn Write,
    doc_name: &str,
    freqs: &TokenFrequencies,
    top: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    let header = format!(
        "Token frequencies in {} ({} tokens, {} distinct):",
        doc_name,
        freqs.total(),
        freqs.distinct()
    );
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
    } else {
        writeln!(w, "{}", header)?;
    }

    let rows = freqs.most_common(top);
    let width = rows.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(0);
    for (token, count) in rows {
        if color.enabled() {
            writeln!(w, "  {:<width$}  {}", token, count.cyan(), width = width)?;
        } else {
            writeln!(w, "  {:<width$}  {}", token, count, width = width)?;
        }
    }
    Ok(())
}

/// Print the target words, one per line.
pub fn print_words<'a>(
    w: &mut dyn Write,
    words: impl Iterator<Item = &'a str>,
) -> std::io::Result<()> {
    for word in words {
        writeln!(w, "{}", word)?;
    }
    Ok(())
}
