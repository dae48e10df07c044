//! Response composition for informational replies.
//!
//! Three independent keyword checks run against the lowercased question.
//! Any subset may fire for one message.

use tracing::{debug, warn};
use uuid::Uuid;

use ynity_types::conversation::ArtifactRefs;
use ynity_types::error::ArtifactError;

use super::artifact::ArtifactBackend;

/// Which artifacts a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArtifactRequest {
    pub voice: bool,
    pub document: bool,
    pub image: bool,
}

impl ArtifactRequest {
    /// Detect artifact requests in `question`. `use_voice` forces audio.
    pub fn detect(question: &str, use_voice: bool) -> Self {
        let lowered = question.to_lowercase();
        Self {
            voice: use_voice
                || lowered.contains("voice reply")
                || lowered.contains("respond in voice"),
            document: lowered.contains("pdf"),
            image: lowered.contains("image"),
        }
    }
}

/// File name for one synthesized reply.
pub fn audio_file_name() -> String {
    format!("resp-{}.mp3", Uuid::now_v7())
}

/// Attaches voice, document and image artifacts to informational replies.
pub struct ResponseComposer<A: ArtifactBackend> {
    backend: A,
}

impl<A: ArtifactBackend> ResponseComposer<A> {
    pub fn new(backend: A) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    /// Produce the artifacts requested by `question` for `reply`.
    ///
    /// Voice and document failures abort; a missing image is simply omitted.
    #[tracing::instrument(name = "compose_artifacts", skip(self, question, reply))]
    pub async fn compose(
        &self,
        question: &str,
        reply: &str,
        use_voice: bool,
    ) -> Result<ArtifactRefs, ArtifactError> {
        let request = ArtifactRequest::detect(question, use_voice);
        let mut refs = ArtifactRefs::default();

        if request.voice {
            let audio = self.backend.synthesize_speech(reply).await?;
            let url = self.backend.store_audio(&audio_file_name(), &audio).await?;
            debug!(url = %url, bytes = audio.len(), "Audio reply stored");
            refs.audio_url = Some(url);
        }

        if request.document {
            refs.file_url = Some(self.backend.generate_document(reply).await?);
        }

        if request.image {
            match self.backend.generate_image(question).await {
                Some(url) => refs.image_url = Some(url),
                None => warn!("Image generation returned nothing, omitting image"),
            }
        }

        Ok(refs)
    }
}
