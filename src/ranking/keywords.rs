// Keyword matcher for the relevance boost

/// Case-insensitive substring matcher over a fixed vocabulary
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    terms: Vec<String>,
}

impl KeywordMatcher {
    /// Build from a vocabulary; blank terms are ignored
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// True iff any term occurs in `text`, ignoring case.
    ///
    /// No word-boundary check: "contract" matches "subcontractor".
    pub fn matches(&self, text: &str) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let text_lower = text.to_lowercase();
        self.terms.iter().any(|term| text_lower.contains(term.as_str()))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
