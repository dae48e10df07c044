//! API keys for the outbound services.

pub mod env;
