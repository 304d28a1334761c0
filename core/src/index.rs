use crate::freq::FreqTable;
use crate::Term;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Frequency tables for an entire corpus, keyed by document path.
///
/// Document keys are unique and kept in order, so every scoring pass over
/// the corpus observes the same document sequence. Built once per corpus
/// (or loaded from the cache) and read-only while scoring.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusIndex {
    docs: BTreeMap<String, FreqTable>,
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by recursively scanning every non-directory file
    /// under `root`.
    ///
    /// Enumeration errors and unreadable documents are logged and skipped;
    /// the index is built from whatever could be read.
    pub fn scan(root: &Path) -> Self {
        let mut index = Self::new();
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable corpus entry");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            match FreqTable::from_file(path) {
                Ok(table) => index.insert(path.display().to_string(), table),
                Err(err) => {
                    tracing::warn!(doc = %path.display(), %err, "skipping unreadable document");
                }
            }
        }
        tracing::debug!(docs = index.len(), root = %root.display(), "corpus scan complete");
        index
    }

    /// Insert a document's table, replacing any existing table for the key.
    pub fn insert(&mut self, doc: String, table: FreqTable) {
        self.docs.insert(doc, table);
    }

    /// Add one (term, count) entry to `doc`'s table, creating the table if
    /// the document is new and summing with any existing count otherwise.
    pub fn merge_row(&mut self, doc: &str, term: &str, count: u32) {
        self.docs
            .entry(doc.to_string())
            .or_default()
            .add(term, count);
    }

    pub fn get(&self, doc: &str) -> Option<&FreqTable> {
        self.docs.get(doc)
    }

    pub fn docs(&self) -> impl Iterator<Item = (&str, &FreqTable)> {
        self.docs.iter().map(|(d, t)| (d.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Inverse document frequency: `log2(N / (df + 1))`, where df is the
    /// number of documents containing the term. The +1 keeps the divisor
    /// positive for terms absent from the whole corpus; it also means idf
    /// goes negative for terms present in more than half the corpus.
    pub fn idf(&self, term: &str) -> f64 {
        let total = self.docs.len() as f64;
        let mut containing = 1.0;
        for table in self.docs.values() {
            if table.contains(term) {
                containing += 1.0;
            }
        }
        (total / containing).log2()
    }

    /// TF-IDF weight of `term` in `doc`; 0 for an unknown document.
    pub fn tfidf(&self, doc: &str, term: &str) -> f64 {
        match self.docs.get(doc) {
            Some(table) => table.tf(term) * self.idf(term),
            None => 0.0,
        }
    }

    /// Cumulative score of `doc` for a query term sequence. The sum is over
    /// the sequence, so a term repeated in the query contributes each time.
    pub fn score(&self, doc: &str, query: &[Term]) -> f64 {
        query.iter().map(|term| self.tfidf(doc, term)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_doc_corpus() -> CorpusIndex {
        let mut index = CorpusIndex::new();
        index.insert("docA".into(), FreqTable::from_text("dog dog cat"));
        index.insert("docB".into(), FreqTable::from_text("cat cat cat"));
        index
    }

    #[test]
    fn idf_counts_containing_documents_plus_one() {
        let index = two_doc_corpus();
        // "dog" appears in one of two documents: log2(2 / (1 + 1)) = 0.
        assert_eq!(index.idf("dog"), 0.0);
        // "cat" appears in both: log2(2 / 3) < 0.
        assert!(index.idf("cat") < 0.0);
        // Absent term: log2(2 / 1) = 1.
        assert_eq!(index.idf("bird"), 1.0);
    }

    #[test]
    fn idf_is_deterministic() {
        let index = two_doc_corpus();
        assert_eq!(index.idf("cat"), index.idf("cat"));
    }

    #[test]
    fn tfidf_uses_document_local_tf() {
        let index = two_doc_corpus();
        assert_eq!(index.get("docA").unwrap().tf("dog"), 1.0);
        assert_eq!(index.get("docB").unwrap().tf("dog"), 0.0);
        // idf("dog") is 0, so both tfidf scores collapse to 0.
        assert_eq!(index.tfidf("docA", "dog"), 0.0);
        assert_eq!(index.tfidf("docB", "dog"), 0.0);
    }

    #[test]
    fn score_sums_over_the_query_sequence() {
        let index = two_doc_corpus();
        // "cat" has tf 0.5 in docA and idf log2(2/3), so each occurrence
        // contributes a nonzero amount.
        let once = index.score("docA", &["cat".to_string()]);
        assert_ne!(once, 0.0);
        let twice = index.score("docA", &["cat".to_string(), "cat".to_string()]);
        assert_eq!(twice, once * 2.0);
    }

    #[test]
    fn empty_query_scores_zero() {
        let index = two_doc_corpus();
        assert_eq!(index.score("docA", &[]), 0.0);
        assert_eq!(index.score("docB", &[]), 0.0);
    }

    #[test]
    fn merge_row_accumulates_counts() {
        let mut index = CorpusIndex::new();
        index.merge_row("doc", "dog", 2);
        index.merge_row("doc", "dog", 3);
        index.merge_row("doc", "cat", 1);
        let table = index.get("doc").unwrap();
        assert_eq!(table.count("dog"), 5);
        assert_eq!(table.count("cat"), 1);
    }

    #[test]
    fn scan_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.txt"), "dog cat").unwrap();
        std::fs::write(dir.path().join("sub/b.txt"), "dog").unwrap();

        let index = CorpusIndex::scan(dir.path());
        assert_eq!(index.len(), 2);
        let a = dir.path().join("a.txt").display().to_string();
        assert_eq!(index.get(&a).unwrap().count("dog"), 1);
    }
}
