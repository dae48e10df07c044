//! Chat turn handling for Ynity.
//!
//! - `trigger`: support-intent classification
//! - `composer`: voice / document / image artifacts for informational replies
//! - `service`: `ChatService`, the turn orchestrator and conversation management

pub mod artifact;
pub mod composer;
pub mod repository;
pub mod service;
pub mod trigger;
