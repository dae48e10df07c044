//! LocalArtifactBackend: writes audio and documents under the public
//! directory and delegates images to the image agent.
//!
//! Layout:
//! ```text
//! {public_dir}/audio/resp-<uuid>.mp3   -> /audio/resp-<uuid>.mp3
//! {public_dir}/files/reply-<uuid>.txt  -> /files/reply-<uuid>.txt
//! ```

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use ynity_core::chat::artifact::ArtifactBackend;
use ynity_types::error::ArtifactError;

use super::voice::SpeechSynthesizer;
use crate::agent::http::HttpAgentClient;

pub struct LocalArtifactBackend {
    public_dir: PathBuf,
    voice: SpeechSynthesizer,
    image_agent: HttpAgentClient,
}

impl LocalArtifactBackend {
    pub fn new(public_dir: PathBuf, voice: SpeechSynthesizer, image_agent: HttpAgentClient) -> Self {
        Self {
            public_dir,
            voice,
            image_agent,
        }
    }

    /// Directory served at `/audio`.
    pub fn audio_dir(&self) -> PathBuf {
        audio_dir(&self.public_dir)
    }

    /// Directory served at `/files`.
    pub fn files_dir(&self) -> PathBuf {
        files_dir(&self.public_dir)
    }
}

pub fn audio_dir(public_dir: &Path) -> PathBuf {
    public_dir.join("audio")
}

pub fn files_dir(public_dir: &Path) -> PathBuf {
    public_dir.join("files")
}

/// Reject names that could escape the target directory.
fn validate_file_name(file_name: &str) -> Result<(), ArtifactError> {
    let ok = !file_name.is_empty()
        && !file_name.contains(['/', '\\'])
        && file_name != "."
        && file_name != "..";
    if ok {
        Ok(())
    } else {
        Err(ArtifactError::Storage(format!("invalid file name: {file_name}")))
    }
}

async fn write_file(dir: &Path, file_name: &str, contents: &[u8]) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(file_name), contents).await
}

impl ArtifactBackend for LocalArtifactBackend {
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ArtifactError> {
        self.voice.synthesize(text).await
    }

    async fn store_audio(&self, file_name: &str, audio: &[u8]) -> Result<String, ArtifactError> {
        validate_file_name(file_name)?;
        write_file(&self.audio_dir(), file_name, audio)
            .await
            .map_err(|e| ArtifactError::Storage(format!("failed to write {file_name}: {e}")))?;
        info!(file_name, bytes = audio.len(), "Audio stored");
        Ok(format!("/audio/{file_name}"))
    }

    async fn generate_document(&self, text: &str) -> Result<String, ArtifactError> {
        let file_name = format!("reply-{}.txt", Uuid::now_v7());
        write_file(&self.files_dir(), &file_name, text.as_bytes())
            .await
            .map_err(|e| ArtifactError::Document(format!("failed to write {file_name}: {e}")))?;
        info!(file_name, "Document generated");
        Ok(format!("/files/{file_name}"))
    }

    async fn generate_image(&self, prompt: &str) -> Option<String> {
        self.image_agent.generate_image(prompt).await
    }
}
