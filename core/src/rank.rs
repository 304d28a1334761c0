use crate::index::CorpusIndex;
use crate::Term;
use serde::Serialize;

/// A document paired with its cumulative query score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub doc: String,
    pub score: f64,
}

/// Score every document in the corpus for `query` and return the top `k`
/// in descending score order.
///
/// The sort is stable, so equal scores keep the index's document order
/// (first encountered wins). If `k` exceeds the corpus size the result is
/// clamped to the corpus size rather than padded.
///
/// Panics if `k` is 0; a zero-length ranking is a caller bug.
pub fn top_k(index: &CorpusIndex, query: &[Term], k: usize) -> Vec<ScoredDocument> {
    assert!(k > 0, "top_k requires k > 0, got {k}");

    let mut scored: Vec<ScoredDocument> = index
        .docs()
        .map(|(doc, _)| ScoredDocument {
            doc: doc.to_string(),
            score: index.score(doc, query),
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}
