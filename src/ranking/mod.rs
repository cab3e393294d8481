//! Relevance ranking
//!
//! Components:
//! - Keyword Matcher: flat boost for sections mentioning the vocabulary
//! - Similarity Scorer: batch query-vs-texts similarity (embedding backed)
//! - Relevance Ranker: fuse, dedup by page identity, keep the top-k

pub mod keywords;
pub mod ranker;
pub mod scorer;

pub use keywords::KeywordMatcher;
pub use ranker::{RankedSection, RankingParams, RelevanceRanker};
pub use scorer::{cosine_similarity, SimilarityScorer};
