pub mod cache;
pub mod freq;
pub mod index;
pub mod rank;
pub mod tokenizer;

/// A normalized search term: lowercase, alphabetic characters only.
pub type Term = String;

pub use cache::{CacheLoad, IndexCache};
pub use freq::FreqTable;
pub use index::CorpusIndex;
pub use rank::{top_k, ScoredDocument};
