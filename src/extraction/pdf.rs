// PDF page extraction and input discovery
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::errors::{Result, SiftError};
use crate::sections::Page;

/// Yields the raw text of each page of a document
pub trait PageExtractor {
    /// Pages with non-blank raw text, numbered from zero
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>>;
}

impl<E: PageExtractor + ?Sized> PageExtractor for &E {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>> {
        (**self).extract_pages(path)
    }
}

/// Pure-Rust PDF text extraction via `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>> {
        let document = display_name(path);
        let bytes = fs::read(path).map_err(|e| SiftError::Extraction {
            document: document.clone(),
            reason: e.to_string(),
        })?;

        // pdf-extract panics on some malformed inputs instead of erroring
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }))
        .map_err(|_| SiftError::Extraction {
            document: document.clone(),
            reason: "parser panicked on malformed PDF".to_string(),
        })?
        .map_err(|e| SiftError::Extraction {
            document: document.clone(),
            reason: e.to_string(),
        })?;

        Ok(extracted
            .into_iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(number, text)| Page { number, text })
            .collect())
    }
}

/// A document found in the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// File name, used as the document identifier in sections and reports
    pub name: String,
    pub path: PathBuf,
}

/// List `.pdf` files (any case) directly inside `dir`, sorted by name
pub fn discover_documents(dir: &Path) -> Result<Vec<DocumentRef>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        SiftError::InputError(format!("Cannot read input directory {}: {}", dir.display(), e))
    })?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_pdf_extension(&path) {
            continue;
        }
        documents.push(DocumentRef {
            name: display_name(&path),
            path,
        });
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(documents)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "persona.json", "c.pdf"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let docs = discover_documents(dir.path()).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "c.pdf"]);
        assert_eq!(docs[1].path, dir.path().join("b.pdf"));
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover_documents(&missing),
            Err(SiftError::InputError(_))
        ));
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfExtractor::new()
            .extract_pages(&dir.path().join("gone.pdf"))
            .unwrap_err();
        match err {
            SiftError::Extraction { document, .. } => assert_eq!(document, "gone.pdf"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_extract_garbage_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();

        assert!(matches!(
            PdfExtractor::new().extract_pages(&path),
            Err(SiftError::Extraction { .. })
        ));
    }
}
