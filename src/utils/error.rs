// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to open document {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to extract text from page {page}: {reason}")]
    PageExtraction { page: usize, reason: String }, // page is 1-based

    #[error("Page index {index} is out of range (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid extraction request: {0}")]
    InvalidRequest(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
