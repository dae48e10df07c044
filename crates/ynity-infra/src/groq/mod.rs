//! OpenAI-compatible chat-completions client (Groq by default) backing the
//! summarization pipeline.

pub mod client;
pub mod types;
