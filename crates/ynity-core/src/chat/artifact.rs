//! ArtifactBackend trait definition.

use ynity_types::error::ArtifactError;

/// Generators for the secondary outputs of an informational reply.
///
/// Voice and document generation report failures as errors. Image
/// generation never fails: it returns `None` instead.
pub trait ArtifactBackend: Send + Sync {
    /// Synthesize speech for `text`, returning encoded audio bytes.
    fn synthesize_speech(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, ArtifactError>> + Send;

    /// Store synthesized audio under `file_name` and return its public reference.
    fn store_audio(
        &self,
        file_name: &str,
        audio: &[u8],
    ) -> impl std::future::Future<Output = Result<String, ArtifactError>> + Send;

    /// Generate a downloadable document from `text` and return its reference.
    fn generate_document(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String, ArtifactError>> + Send;

    /// Generate an image for `prompt`; `None` on any failure.
    fn generate_image(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Option<String>> + Send;
}
