//! docsift - persona-driven PDF section ranking
//!
//! Extracts per-page text from a batch of PDFs, scores each page against a
//! handful of task queries with local sentence embeddings, and reports the
//! top-k most relevant pages.
//!
//! # Architecture
//!
//! - **text / sections**: clean page text into bounded sections
//! - **ranking**: keyword boost + multi-query similarity, deduplicated top-k
//! - **embedding**: Candle sentence-embedding model behind the scorer trait
//! - **extraction / persona / report / pipeline**: run plumbing

pub mod errors;
pub use errors::{Result, SiftError};

pub mod text;
pub mod sections;
pub mod ranking;
pub mod embedding;
pub mod extraction;

pub mod cli;
pub mod persona;
pub mod report;
pub mod pipeline;

pub use pipeline::Pipeline;
pub use ranking::{RankedSection, RelevanceRanker, SimilarityScorer};
pub use sections::{Section, SectionId};
