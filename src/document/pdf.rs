// src/document/pdf.rs
use crate::document::Document;
use crate::utils::error::DocumentError;
use std::path::{Path, PathBuf};

/// A PDF opened from disk through `lopdf`.
pub struct PdfDocument {
    path: PathBuf,
    inner: lopdf::Document,
    // lopdf page numbers (1-based), ascending. Index i maps to page_numbers[i].
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    /// Opens and parses the PDF at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        tracing::debug!("Opening PDF: {}", path.display());

        let inner = lopdf::Document::load(&path).map_err(|source| DocumentError::Open {
            path: path.clone(),
            source,
        })?;

        // get_pages() is a BTreeMap keyed by page number, so keys come out sorted
        let page_numbers: Vec<u32> = inner.get_pages().keys().copied().collect();
        tracing::info!("Opened {} ({} pages)", path.display(), page_numbers.len());

        Ok(Self {
            path,
            inner,
            page_numbers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Document for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, DocumentError> {
        let page_number = *self
            .page_numbers
            .get(index)
            .ok_or(DocumentError::PageOutOfRange {
                index,
                page_count: self.page_numbers.len(),
            })?;

        self.inner
            .extract_text(&[page_number])
            .map_err(|e| DocumentError::PageExtraction {
                page: index + 1,
                reason: e.to_string(),
            })
    }
}
