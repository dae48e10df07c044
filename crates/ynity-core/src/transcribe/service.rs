//! Transcriber: validates an upload and hands it to the speech-to-text backend.

use tracing::info;

use ynity_types::error::TranscriptionError;

use super::client::{AudioUpload, TranscriptionClient};

/// Name used when the uploader sent no usable file name.
const DEFAULT_FILE_NAME: &str = "audio.webm";

pub struct Transcriber<T: TranscriptionClient> {
    client: T,
}

impl<T: TranscriptionClient> Transcriber<T> {
    pub fn new(client: T) -> Self {
        Self { client }
    }

    /// Transcribe one recording. Empty uploads are rejected without a call.
    #[tracing::instrument(
        name = "transcribe",
        skip(self, audio),
        fields(bytes = audio.bytes.len())
    )]
    pub async fn transcribe(&self, mut audio: AudioUpload) -> Result<String, TranscriptionError> {
        if audio.bytes.is_empty() {
            return Err(TranscriptionError::Validation("No audio file".to_string()));
        }
        if audio.file_name.trim().is_empty() {
            audio.file_name = DEFAULT_FILE_NAME.to_string();
        }

        let text = self.client.transcribe(audio).await?;
        info!(chars = text.chars().count(), "Audio transcribed");
        Ok(text)
    }
}
