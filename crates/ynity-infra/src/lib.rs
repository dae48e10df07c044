//! Infrastructure layer for Ynity.
//!
//! Contains implementations of the ports defined in `ynity-core`: SQLite
//! repositories, HTTP clients for the agent services and the completion
//! backend, speech synthesis and transcription, and local artifact storage.

pub mod agent;
pub mod artifact;
pub mod config;
pub mod groq;
pub mod http;
pub mod secret;
pub mod sqlite;
pub mod whisper;
