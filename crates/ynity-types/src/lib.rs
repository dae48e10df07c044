//! Shared domain types for Ynity.
//!
//! This crate contains the core domain types used across the Ynity backend:
//! conversations and their messages, summarization jobs, study chapters,
//! global configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chapter;
pub mod config;
pub mod conversation;
pub mod error;
pub mod summary;
