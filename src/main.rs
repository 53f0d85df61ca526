// src/main.rs
mod utils;
mod document;
mod extractors;
mod output;

use clap::Parser;
use document::PdfDocument;
use extractors::{ExtractionRequest, PageRangeExtractor};
use output::{DocumentReport, OutputFormat};
use std::path::PathBuf;
use utils::AppError;

/// Extract page text from PDF files, optionally keeping only pages that
/// match a keyword.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PDF files to read
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// First page to extract (zero-based, inclusive)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    start: i64,

    /// Page to stop at (zero-based, exclusive). Defaults to the last page
    #[arg(short, long, allow_negative_numbers = true)]
    end: Option<i64>,

    /// Only keep pages matching this case-insensitive regex
    #[arg(short, long)]
    keyword: Option<String>,

    /// Match the keyword as plain text instead of a regex
    #[arg(short = 'F', long, requires = "keyword")]
    fixed_strings: bool,

    /// Cut each document's output after this many characters
    #[arg(long, env = "PDF_PAGES_MAX_CHARS")]
    max_chars: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    /// Builds the extraction request, rejecting bad ranges and patterns
    /// before any file is touched.
    fn request(&self) -> Result<ExtractionRequest, AppError> {
        let request = ExtractionRequest::new(self.start, self.end)?;
        match &self.keyword {
            Some(pattern) => Ok(request.with_keyword(pattern, self.fixed_strings)?),
            None => Ok(request),
        }
    }
}

/// Opens and extracts each path in order. A document that fails to open is
/// logged and recorded in its report; the rest are still attempted. Fails
/// only when none of the documents could be opened.
fn process(
    paths: &[PathBuf],
    request: &ExtractionRequest,
    extractor: &PageRangeExtractor,
    max_chars: Option<usize>,
) -> Result<Vec<DocumentReport>, AppError> {
    let mut reports = Vec::with_capacity(paths.len());
    let mut success_count = 0;
    let mut failure_count = 0;

    for path in paths {
        match PdfDocument::open(path) {
            Ok(doc) => {
                let result = extractor.extract(&doc, request);
                if result.is_empty() {
                    tracing::warn!("No pages selected from {}", doc.path().display());
                }
                tracing::info!(
                    "Extracted {} page(s) from {} ({} unreadable)",
                    result.included_pages.len(),
                    doc.path().display(),
                    result.failed_pages.len()
                );
                reports.push(DocumentReport::extracted(path, request, result, max_chars));
                success_count += 1;
            }
            Err(e) => {
                tracing::error!("{}", e);
                reports.push(DocumentReport::failed(path, request, &e));
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 {
        return Err(AppError::Processing(format!(
            "Failed to open any of the {} requested document(s)",
            failure_count
        )));
    }

    Ok(reports)
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Validate the request up front
    let request = args.request()?;
    let extractor = PageRangeExtractor::new();

    // 4. Process each document independently
    let reports = process(&args.paths, &request, &extractor, args.max_chars)?;

    // 5. Print whatever we have
    let stdout = std::io::stdout();
    output::write_reports(&mut stdout.lock(), &reports, args.format)?;

    Ok(())
}
