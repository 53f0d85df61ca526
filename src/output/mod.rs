// src/output/mod.rs
use crate::extractors::{ExtractionRequest, ExtractionResult};
use crate::utils::error::{DocumentError, OutputError};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const TRUNCATION_MARKER: &str = "...[truncated]...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Page blocks as plain text
    Text,
    /// One JSON report per document
    Json,
}

/// What we print for one input document, in either output format.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub document: String,
    pub path: String,
    pub page_count: Option<usize>,
    pub start: usize,
    pub end: Option<usize>,
    pub keyword: Option<String>,
    pub included_pages: Vec<usize>,
    pub failed_pages: Vec<usize>,
    pub truncated: bool,
    pub text: String,
    pub error: Option<String>,
    pub extracted_at: String,
}

impl DocumentReport {
    fn base(path: &Path, request: &ExtractionRequest) -> Self {
        Self {
            document: display_name(path),
            path: path.display().to_string(),
            page_count: None,
            start: request.start_index(),
            end: request.end_index(),
            keyword: request.keyword().map(str::to_string),
            included_pages: Vec::new(),
            failed_pages: Vec::new(),
            truncated: false,
            text: String::new(),
            error: None,
            extracted_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Report for a document that was opened and extracted. `max_chars`
    /// limits the text that is kept.
    pub fn extracted(
        path: &Path,
        request: &ExtractionRequest,
        result: ExtractionResult,
        max_chars: Option<usize>,
    ) -> Self {
        let (text, truncated) = match max_chars {
            Some(limit) => truncate(&result.text, limit),
            None => (result.text, false),
        };
        Self {
            page_count: Some(result.page_count),
            included_pages: result.included_pages,
            failed_pages: result.failed_pages,
            truncated,
            text,
            ..Self::base(path, request)
        }
    }

    /// Report for a document that could not be opened.
    pub fn failed(path: &Path, request: &ExtractionRequest, error: &DocumentError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::base(path, request)
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// The document's text as printed: possibly cut, followed by the
    /// truncation marker when it was.
    fn body(&self) -> String {
        if self.truncated {
            format!("{}\n{}", self.text, TRUNCATION_MARKER)
        } else {
            self.text.clone()
        }
    }
}

/// Final path component, or the whole path when there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Cuts `text` to at most `max_chars` characters. Returns the kept text and
/// whether anything was dropped.
pub fn truncate(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

fn with_trailing_newline(mut s: String) -> String {
    if !s.is_empty() && !s.ends_with('\n') {
        s.push('\n');
    }
    s
}

/// Renders one report as plain text. With `bracketed` set the output is
/// wrapped in START/END markers naming the document.
pub fn render_text(report: &DocumentReport, bracketed: bool) -> String {
    let body = with_trailing_newline(report.body());
    if bracketed {
        format!(
            "--- START OF {name} ---\n{body}--- END OF {name} ---\n",
            name = report.document,
            body = body
        )
    } else {
        body
    }
}

/// Writes all reports to `out` in the requested format. Documents that
/// failed to open are left out of text output; their errors are logged.
pub fn write_reports<W: Write>(
    out: &mut W,
    reports: &[DocumentReport],
    format: OutputFormat,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => {
            let bracketed = reports.len() > 1;
            for report in reports.iter().filter(|r| !r.is_failure()) {
                out.write_all(render_text(report, bracketed).as_bytes())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, reports)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> ExtractionRequest {
        ExtractionRequest::new(0, Some(3)).unwrap()
    }

    fn result(text: &str) -> ExtractionResult {
        ExtractionResult {
            text: text.to_string(),
            page_count: 3,
            included_pages: vec![1],
            failed_pages: Vec::new(),
        }
    }

    fn report(path: &str, text: &str, max_chars: Option<usize>) -> DocumentReport {
        DocumentReport::extracted(Path::new(path), &request(), result(text), max_chars)
    }

    #[test]
    fn test_truncate_within_limit() {
        assert_eq!(truncate("short", 10), ("short".to_string(), false));
        assert_eq!(truncate("exact", 5), ("exact".to_string(), false));
    }

    #[test]
    fn test_truncate_over_limit() {
        assert_eq!(truncate("abcdefgh", 3), ("abc".to_string(), true));
        assert_eq!(truncate("abc", 0), (String::new(), true));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let (kept, cut) = truncate("héllo wörld", 7);
        assert_eq!(kept, "héllo w");
        assert!(cut);
    }

    #[test]
    fn test_display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/data/regs/R2025.pdf")), "R2025.pdf");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_single_document_is_not_bracketed() {
        let r = report("/tmp/a.pdf", "--- Page 1 ---\nhello\n", None);
        assert_eq!(render_text(&r, false), "--- Page 1 ---\nhello\n");
    }

    #[test]
    fn test_bracketed_document() {
        let r = report("/tmp/a.pdf", "--- Page 1 ---\nhello\n", None);
        assert_eq!(
            render_text(&r, true),
            "--- START OF a.pdf ---\n--- Page 1 ---\nhello\n--- END OF a.pdf ---\n"
        );
    }

    #[test]
    fn test_truncated_body_has_marker() {
        let r = report("/tmp/a.pdf", "--- Page 1 ---\nhello\n", Some(10));
        assert!(r.truncated);
        assert_eq!(render_text(&r, false), "--- Page 1\n...[truncated]...\n");
    }

    #[test]
    fn test_text_output_skips_failed_documents() {
        let missing = PathBuf::from("/tmp/missing.pdf");
        let err = crate::document::PdfDocument::open(&missing).err().unwrap();
        let reports = vec![
            report("/tmp/a.pdf", "--- Page 1 ---\nA\n", None),
            DocumentReport::failed(&missing, &request(), &err),
            report("/tmp/b.pdf", "--- Page 1 ---\nB\n", None),
        ];

        let mut out = Vec::new();
        write_reports(&mut out, &reports, OutputFormat::Text).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert_eq!(
            printed,
            "--- START OF a.pdf ---\n--- Page 1 ---\nA\n--- END OF a.pdf ---\n\
             --- START OF b.pdf ---\n--- Page 1 ---\nB\n--- END OF b.pdf ---\n"
        );
        assert!(!printed.contains("missing.pdf"));
    }

    #[test]
    fn test_json_output_includes_errors() {
        let missing = PathBuf::from("/tmp/missing.pdf");
        let err = crate::document::PdfDocument::open(&missing).err().unwrap();
        let reports = vec![
            report("/tmp/a.pdf", "--- Page 1 ---\nA\n", None),
            DocumentReport::failed(&missing, &request(), &err),
        ];

        let mut out = Vec::new();
        write_reports(&mut out, &reports, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["document"], "a.pdf");
        assert_eq!(items[0]["page_count"], 3);
        assert_eq!(items[0]["end"], 3);
        assert!(items[0]["error"].is_null());
        assert_eq!(items[1]["document"], "missing.pdf");
        assert!(items[1]["page_count"].is_null());
        assert!(items[1]["error"].as_str().unwrap().contains("missing.pdf"));
    }
}
