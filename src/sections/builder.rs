// Section builder: per-page text -> bounded sections
use serde::{Deserialize, Serialize};

use crate::sections::types::{Page, Section};
use crate::text::{clean_text, truncate_chars};

/// Character budgets for section fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLimits {
    pub title_max_len: usize,
    pub snippet_max_len: usize,
}

impl Default for SectionLimits {
    fn default() -> Self {
        Self {
            title_max_len: 120,
            snippet_max_len: 1200,
        }
    }
}

/// Turns extracted pages into sections
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    limits: SectionLimits,
}

impl SectionBuilder {
    pub fn new(limits: SectionLimits) -> Self {
        Self { limits }
    }

    /// Build one section per page that still has text after cleaning.
    ///
    /// Blank pages are dropped rather than emitted as empty sections.
    pub fn build<I>(&self, document: &str, pages: I) -> Vec<Section>
    where
        I: IntoIterator<Item = Page>,
    {
        pages
            .into_iter()
            .filter_map(|page| self.build_page(document, &page))
            .collect()
    }

    /// Build the section for a single page, or `None` if it has no text
    pub fn build_page(&self, document: &str, page: &Page) -> Option<Section> {
        let cleaned = clean_text(&page.text);
        if cleaned.is_empty() {
            return None;
        }

        let first_line = cleaned.lines().next().unwrap_or_default();

        Some(Section {
            document: document.to_string(),
            page_number: page.number,
            section_title: truncate_chars(first_line, self.limits.title_max_len).to_string(),
            text: truncate_chars(&cleaned, self.limits.snippet_max_len).to_string(),
        })
    }
}
