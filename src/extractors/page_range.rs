// src/extractors/page_range.rs

// --- Imports ---
use crate::document::Document;
use crate::utils::error::ExtractError;
use regex::{Regex, RegexBuilder};

// --- Data Structures ---

/// Which pages to extract and, optionally, which of them to keep.
///
/// `start_index` is inclusive and `end_index` exclusive, both zero-based.
/// `end_index` may exceed the page count; it is clamped at extraction time.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    start_index: usize,
    end_index: Option<usize>, // None = through the last page
    keyword: Option<Regex>,
}

impl ExtractionRequest {
    /// Validates a raw `start..end` range. Negative values and `end < start`
    /// are rejected here, before any document is opened.
    pub fn new(start: i64, end: Option<i64>) -> Result<Self, ExtractError> {
        if start < 0 {
            return Err(ExtractError::InvalidRequest(format!(
                "start index must not be negative (got {})",
                start
            )));
        }
        if let Some(end) = end {
            if end < start {
                return Err(ExtractError::InvalidRequest(format!(
                    "end index {} is less than start index {}",
                    end, start
                )));
            }
        }

        let to_index = |v: i64| usize::try_from(v).unwrap_or(usize::MAX);
        Ok(Self {
            start_index: to_index(start),
            end_index: end.map(to_index),
            keyword: None,
        })
    }

    /// Keeps only pages whose text matches `pattern`, case-insensitively.
    /// With `literal` set the pattern is matched as plain text.
    pub fn with_keyword(mut self, pattern: &str, literal: bool) -> Result<Self, ExtractError> {
        let source = if literal {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };
        let re = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                ExtractError::InvalidRequest(format!("invalid keyword pattern '{}': {}", pattern, e))
            })?;
        self.keyword = Some(re);
        Ok(self)
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> Option<usize> {
        self.end_index
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_ref().map(|re| re.as_str())
    }

    /// `min(end_index, page_count)`.
    fn effective_end(&self, page_count: usize) -> usize {
        self.end_index.map_or(page_count, |end| end.min(page_count))
    }
}

/// The concatenated page blocks of one extraction, plus bookkeeping about
/// which pages made it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
    pub page_count: usize,
    pub included_pages: Vec<usize>, // 1-based
    pub failed_pages: Vec<usize>,   // 1-based, text replaced with ""
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Formats one page block: marker line, text, trailing newline.
pub fn page_block(index: usize, text: &str) -> String {
    format!("--- Page {} ---\n{}\n", index + 1, text)
}

// --- Main Extractor Structure ---
pub struct PageRangeExtractor;

impl PageRangeExtractor {
    pub fn new() -> Self { Self {} }

    /// Extracts the requested page range from `document`.
    ///
    /// A page whose text cannot be extracted is logged and treated as empty,
    /// so one damaged page never aborts the rest of the document.
    pub fn extract<D: Document + ?Sized>(&self, document: &D, request: &ExtractionRequest) -> ExtractionResult {
        let page_count = document.page_count();
        let end = request.effective_end(page_count);
        let mut result = ExtractionResult {
            page_count,
            ..ExtractionResult::default()
        };

        if request.start_index >= end {
            tracing::debug!(
                "Empty range: start {} >= effective end {} (document has {} pages)",
                request.start_index, end, page_count
            );
            return result;
        }

        tracing::debug!("Extracting pages {}..{} of {}", request.start_index, end, page_count);

        for index in request.start_index..end {
            let text = match document.page_text(index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Skipping unreadable page {}: {}", index + 1, e);
                    result.failed_pages.push(index + 1);
                    String::new()
                }
            };

            if let Some(re) = &request.keyword {
                if !re.is_match(&text) {
                    tracing::trace!("Page {} does not match keyword '{}'", index + 1, re.as_str());
                    continue;
                }
            }

            result.text.push_str(&page_block(index, &text));
            result.included_pages.push(index + 1);
        }

        tracing::debug!(
            "Included {} of {} pages in range ({} failed)",
            result.included_pages.len(),
            end - request.start_index,
            result.failed_pages.len()
        );
        result
    }
}

impl Default for PageRangeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
