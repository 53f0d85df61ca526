// src/extractors/mod.rs
pub mod page_range;

// Re-export key extraction types for convenience
pub use page_range::{ExtractionRequest, ExtractionResult, PageRangeExtractor};
