//! Lowercased token frequency table.
//!
//! This is an independent view of a text. It is not used by
//! [`WordCounter`](crate::WordCounter): token equality and whole-word regex
//! matching disagree around punctuation (`mr.` is one regex hit for `mr`
//! but the tokens `mr` and `.`), so the two are kept apart.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Word runs, clitics (`'s`, `'ll`), or a single punctuation mark.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'\w+|\w+|[^\w\s]").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequencies {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TokenFrequencies {
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of tokens seen, duplicates included.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The `n` most frequent tokens, ties broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut items: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        items.truncate(n);
        items
    }
}

/// Split `text` into lowercase tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build a frequency table over the lowercase tokens of `text`.
pub fn token_frequencies(text: &str) -> TokenFrequencies {
    let mut freqs = TokenFrequencies::default();
    for token in tokenize(text) {
        *freqs.counts.entry(token).or_insert(0) += 1;
        freqs.total += 1;
    }
    freqs
}
