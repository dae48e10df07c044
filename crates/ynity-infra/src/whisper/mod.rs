//! OpenAI-compatible speech-to-text client backing voice questions.

pub mod client;
