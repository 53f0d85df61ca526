// src/document/mod.rs
pub mod pdf;

use crate::utils::error::DocumentError;

/// A paginated text source.
///
/// Pages are addressed by zero-based index in `[0, page_count())`. Text is
/// produced on demand each time `page_text` is called; implementations do
/// not cache it.
pub trait Document {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Plain text of the page at `index`. An empty string is a valid result
    /// (image-only pages, pages without a text layer).
    fn page_text(&self, index: usize) -> Result<String, DocumentError>;
}

pub use pdf::PdfDocument;
