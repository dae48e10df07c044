//! HTTP/REST API layer for Ynity.
//!
//! Axum-based REST API under `/api/` with caller identity from the
//! upstream auth layer, envelope response format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
