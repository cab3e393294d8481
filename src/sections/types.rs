// Section data model
use serde::{Deserialize, Serialize};

/// Raw text of one extracted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page index within its document
    pub number: usize,
    pub text: String,
}

impl Page {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Identity used to deduplicate sections across queries
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId {
    pub document: String,
    pub page_number: usize,
}

/// One page of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub document: String,
    pub page_number: usize,
    pub section_title: String,
    pub text: String,
}

impl Section {
    pub fn id(&self) -> SectionId {
        SectionId {
            document: self.document.clone(),
            page_number: self.page_number,
        }
    }
}
