//! Generated study chapters: agent call, validation and per-user storage.

pub mod repository;
pub mod service;
