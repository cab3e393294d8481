//! Document discovery and per-page text extraction

pub mod pdf;

pub use pdf::{discover_documents, DocumentRef, PageExtractor, PdfExtractor};
