use crate::tokenizer::normalize;
use crate::Term;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Term counts for a single document.
///
/// Counts are never negative and an absent term counts as 0. Keys are kept
/// ordered so iteration (and the serialized cache) is deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FreqTable {
    counts: BTreeMap<Term, u32>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a document and count each whitespace-delimited token after
    /// normalization. Tokens that normalize to the empty string are counted
    /// under the empty term.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading document {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        for token in text.split_whitespace() {
            table.add(&normalize(token), 1);
        }
        table
    }

    /// Add `count` occurrences of `term`, summing with any existing count.
    /// Cache deserialization relies on the summing behavior for duplicate
    /// (document, term) rows.
    pub fn add(&mut self, term: &str, count: u32) {
        *self.counts.entry(term.to_string()).or_insert(0) += count;
    }

    /// Count for a term; 0 if the term never occurred.
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// The term with the highest count, or `("", 0)` for an empty table.
    /// Ties go to the first term in key order.
    pub fn most_frequent(&self) -> (&str, u32) {
        let mut best = ("", 0);
        for (term, &count) in &self.counts {
            if count > best.1 {
                best = (term, count);
            }
        }
        best
    }

    /// Term frequency normalized by the document's own most frequent term,
    /// in [0, 1]. Defined as 0 for a document with no terms.
    pub fn tf(&self, term: &str) -> f64 {
        let (_, high) = self.most_frequent();
        if high == 0 {
            return 0.0;
        }
        f64::from(self.count(term)) / f64::from(high)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}
