//! Observability setup for Ynity: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
