//! Flat-file cache for a [`CorpusIndex`].
//!
//! One row per (document, term, count) triple:
//!
//! ```text
//! "docs/a.txt","dog",3
//! ```
//!
//! Document and term fields are double-quoted with embedded quotes escaped
//! by doubling, so values containing commas or quotes round-trip. Values
//! without either serialize exactly as the unescaped common case above.
//!
//! Known limitations: the cache records nothing about the corpus it was
//! built from, so a present cache file is used as-is even if the corpus
//! has changed since it was written; and a document with no terms produces
//! no rows, so it is absent after a round trip.

use crate::index::CorpusIndex;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A deserialized cache file plus how many malformed rows were skipped.
#[derive(Debug)]
pub struct CacheLoad {
    pub index: CorpusIndex,
    pub skipped_rows: usize,
}

/// On-disk cache sitting in front of corpus scanning.
#[derive(Debug, Clone)]
pub struct IndexCache {
    path: PathBuf,
}

impl IndexCache {
    /// Well-known cache filename, resolved against the working directory.
    pub const DEFAULT_FILE: &'static str = "database.csv";

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn at_default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Return the cached index if the cache file exists; otherwise scan the
    /// corpus, write the cache file, and return the fresh index.
    ///
    /// When the cache is present the corpus is not touched at all, even if
    /// it changed since the cache was written.
    pub fn load_or_build(&self, corpus_root: &Path) -> Result<CorpusIndex> {
        if self.exists() {
            let load = self.read()?;
            if load.skipped_rows > 0 {
                tracing::warn!(
                    skipped = load.skipped_rows,
                    cache = %self.path.display(),
                    "ignored malformed cache rows"
                );
            }
            tracing::debug!(docs = load.index.len(), cache = %self.path.display(), "loaded cached index");
            return Ok(load.index);
        }
        let index = CorpusIndex::scan(corpus_root);
        self.write(&index)?;
        tracing::debug!(docs = index.len(), cache = %self.path.display(), "wrote index cache");
        Ok(index)
    }

    /// Parse the cache file, merging rows per document and summing counts
    /// for duplicate (document, term) rows. Malformed rows are skipped and
    /// counted, never fatal.
    pub fn read(&self) -> Result<CacheLoad> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading index cache {}", self.path.display()))?;
        let mut index = CorpusIndex::new();
        let mut skipped_rows = 0;
        for (lineno, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match parse_row(line) {
                Some((doc, term, count)) => index.merge_row(&doc, &term, count),
                None => {
                    tracing::warn!(line = lineno + 1, "malformed cache row");
                    skipped_rows += 1;
                }
            }
        }
        Ok(CacheLoad {
            index,
            skipped_rows,
        })
    }

    pub fn write(&self, index: &CorpusIndex) -> Result<()> {
        fs::write(&self.path, serialize(index))
            .with_context(|| format!("writing index cache {}", self.path.display()))
    }
}

/// Serialize an index to the cache row format, one row per (document,
/// term, count) triple, in document and term order.
pub fn serialize(index: &CorpusIndex) -> String {
    let mut out = String::new();
    for (doc, table) in index.docs() {
        for (term, count) in table.terms() {
            out.push_str(&quote(doc));
            out.push(',');
            out.push_str(&quote(term));
            out.push(',');
            out.push_str(&count.to_string());
            out.push('\n');
        }
    }
    out
}

fn quote(field: &str) -> String {
    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for c in field.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Parse one `"doc","term",count` row. Returns `None` for any malformed
/// row: missing quotes, missing separators, or a bad count.
fn parse_row(line: &str) -> Option<(String, String, u32)> {
    let rest = line.strip_prefix('"')?;
    let (doc, rest) = take_quoted(rest)?;
    let rest = rest.strip_prefix(',')?.strip_prefix('"')?;
    let (term, rest) = take_quoted(rest)?;
    let count = rest.strip_prefix(',')?.parse().ok()?;
    Some((doc, term, count))
}

/// Consume a quoted field body up to its closing quote, unescaping doubled
/// quotes. Returns the field and the remainder after the closing quote.
fn take_quoted(s: &str) -> Option<(String, &str)> {
    let mut field = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            field.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '"')) => field.push('"'),
            Some((j, _)) => return Some((field, &s[j..])),
            None => return Some((field, &s[i + 1..])),
        }
    }
    None
}
