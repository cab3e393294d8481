//! Local sentence embeddings
//!
//! The engine owns the model and turns text into vectors; the scorer adapts
//! it to the ranker's batch similarity interface.

pub mod engine;
pub mod scorer;

pub use engine::{EmbeddingEngine, ModelFiles, ModelSource};
pub use scorer::EmbeddingScorer;
