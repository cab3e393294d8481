//! Text cleanup for raw extracted page text

pub mod normalizer;

pub use normalizer::{clean_text, truncate_chars};
