//! REST endpoint handlers.

pub mod chapter;
pub mod chat;
pub mod conversation;
pub mod summarize;
pub mod transcribe;
