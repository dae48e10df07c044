//! TranscriptionClient trait definition.

use ynity_types::error::TranscriptionError;

/// One uploaded audio recording.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    /// MIME type reported by the uploader, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A speech-to-text backend.
///
/// Implementations live in ynity-infra (e.g., `WhisperTranscriptionClient`).
pub trait TranscriptionClient: Send + Sync {
    fn transcribe(
        &self,
        audio: AudioUpload,
    ) -> impl std::future::Future<Output = Result<String, TranscriptionError>> + Send;
}
