//! Page sections: the unit the ranker scores
//!
//! A section is one page of one document, reduced to a short title and a
//! bounded text snippet.

pub mod builder;
pub mod types;

pub use builder::{SectionBuilder, SectionLimits};
pub use types::{Page, Section, SectionId};
