use std::fmt;

use regex::Regex;

use crate::TallyError;

/// Per-word occurrence counts, ordered like the word list that produced them.
///
/// Keys are the target words exactly as configured. A word listed twice
/// keeps its first position and appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: Vec<(String, u64)>,
}

/// Corpus-wide sum of [`CountMap`]s.
pub type AggregateCountMap = CountMap;

impl CountMap {
    /// A map with every word present at zero.
    pub fn zeroed<S: AsRef<str>>(words: &[S]) -> Self {
        let mut map = Self::default();
        for word in words {
            map.add_count(word.as_ref(), 0);
        }
        map
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Add `count` to `word`, inserting it at the end if it is new.
    pub fn add_count(&mut self, word: &str, count: u64) {
        match self.entries.iter_mut().find(|(w, _)| w == word) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((word.to_string(), count)),
        }
    }

    /// The same entries, highest count first. Ties keep word-list order.
    pub fn ranked(&self) -> CountMap {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        CountMap { entries }
    }

    /// Element-wise sum: every entry of `other` is added into `self`.
    pub fn merge(&mut self, other: &CountMap) {
        for (word, count) in other.iter() {
            self.add_count(word, count);
        }
    }
}

impl fmt::Display for CountMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (word, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", word, count)?;
        }
        write!(f, "}}")
    }
}

/// Counts whole-word, case-insensitive occurrences of a fixed word list.
///
/// One regex per word is compiled up front and reused for every text.
/// A match must be bounded by non-word characters or the ends of the
/// text, so `he` is never found inside `the`.
#[derive(Debug, Clone)]
pub struct WordCounter {
    patterns: Vec<(String, Regex)>,
}

impl WordCounter {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Result<Self, TallyError> {
        let mut patterns: Vec<(String, Regex)> = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref();
            if patterns.iter().any(|(w, _)| w == word) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
            let re = Regex::new(&pattern).map_err(|source| TallyError::Pattern {
                word: word.to_string(),
                source,
            })?;
            patterns.push((word.to_string(), re));
        }
        Ok(Self { patterns })
    }

    /// Target words in counting order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(w, _)| w.as_str())
    }

    /// A map with every target word at zero.
    pub fn zeroed(&self) -> CountMap {
        CountMap::zeroed(&self.words().collect::<Vec<_>>())
    }

    /// Count non-overlapping whole-word matches of each target word in `text`.
    pub fn count(&self, text: &str) -> CountMap {
        let entries = self
            .patterns
            .iter()
            .map(|(word, re)| {
                let n = re.find_iter(text).count() as u64;
                tracing::trace!(word = %word, count = n, "counted");
                (word.clone(), n)
            })
            .collect();
        CountMap { entries }
    }
}

/// One-shot helper: build a [`WordCounter`] for `words` and count `text`.
pub fn count_words<S: AsRef<str>>(text: &str, words: &[S]) -> Result<CountMap, TallyError> {
    Ok(WordCounter::new(words)?.count(text))
}
