//! HTTP adapters for the remote Python agents.

pub mod http;
pub mod types;
