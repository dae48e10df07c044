//! Artifact generation: speech synthesis and files served from the public
//! directory.

pub mod local;
pub mod voice;
