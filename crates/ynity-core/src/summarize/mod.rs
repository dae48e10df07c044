//! Long-document summarization.
//!
//! - `chunker`: char-boundary-safe fixed-size slicing
//! - `backoff`: wait extraction from rate-limit error text
//! - `pipeline`: `SummarizationPipeline`, the chunk -> summarize -> merge job

pub mod backoff;
pub mod chunker;
pub mod completion;
pub mod pipeline;
