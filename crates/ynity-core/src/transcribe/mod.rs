//! Speech-to-text for recorded questions.
//!
//! - `client`: `TranscriptionClient` port and the `AudioUpload` it consumes
//! - `service`: `Transcriber`, upload validation in front of the client

pub mod client;
pub mod service;
