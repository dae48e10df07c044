//! Business logic and repository trait definitions for Ynity.
//!
//! This crate defines the "ports" (repository, agent, artifact,
//! completion and transcription traits) that the infrastructure layer implements. It depends
//! only on `ynity-types` -- never on `ynity-infra` or any database/IO crate.

pub mod agent;
pub mod chapter;
pub mod chat;
pub mod summarize;
pub mod transcribe;

#[cfg(test)]
pub(crate) mod testing;
