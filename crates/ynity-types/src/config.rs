//! Global configuration types for Ynity.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! agent endpoints, the summarization backend, voice synthesis and the
//! HTTP server. Every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Ynity backend.
///
/// Loaded from `~/.ynity/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub agents: AgentEndpoints,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Base URLs of the external agent services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEndpoints {
    /// Coaching agent (motivational support).
    #[serde(default = "default_coach_url")]
    pub coach_url: String,
    /// Question-answering agent (also used for titles).
    #[serde(default = "default_assistant_url")]
    pub assistant_url: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    #[serde(default = "default_chapter_url")]
    pub chapter_url: String,
}

fn default_coach_url() -> String {
    "http://127.0.0.1:8002".to_string()
}

fn default_assistant_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_image_url() -> String {
    "https://agents-python.onrender.com".to_string()
}

fn default_chapter_url() -> String {
    "https://agents-python-1.onrender.com".to_string()
}

impl Default for AgentEndpoints {
    fn default() -> Self {
        Self {
            coach_url: default_coach_url(),
            assistant_url: default_assistant_url(),
            image_url: default_image_url(),
            chapter_url: default_chapter_url(),
        }
    }
}

/// Chat-completion backend used by the summarization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_summarizer_base_url")]
    pub base_url: String,
    #[serde(default = "default_summarizer_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Kept low to avoid tokens-per-minute spikes.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Maximum characters per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Wait used when a rate-limit error carries no parseable hint.
    #[serde(default = "default_retry_secs")]
    pub default_retry_secs: f64,
    /// Ceiling on rate-limit retries per call; `None` retries forever.
    #[serde(default)]
    pub max_rate_limit_retries: Option<u32>,
}

fn default_summarizer_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_summarizer_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f64 {
    0.4
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_chunk_size() -> usize {
    7000
}

fn default_retry_secs() -> f64 {
    5.0
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_summarizer_base_url(),
            model: default_summarizer_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            chunk_size: default_chunk_size(),
            default_retry_secs: default_retry_secs(),
            max_rate_limit_retries: None,
        }
    }
}

/// Text-to-speech backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_voice_base_url")]
    pub base_url: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_voice_model")]
    pub model_id: String,
}

fn default_voice_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_voice_model() -> String {
    "eleven_multilingual_v2".to_string()
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_voice_base_url(),
            voice_id: default_voice_id(),
            model_id: default_voice_model(),
        }
    }
}

/// Speech-to-text backend (OpenAI-compatible `audio/transcriptions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_transcription_base_url")]
    pub base_url: String,
    #[serde(default = "default_transcription_model")]
    pub model: String,
}

fn default_transcription_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: default_transcription_base_url(),
            model: default_transcription_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// A conversation holding more than this many messages is rotated.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

fn default_max_messages() -> usize {
    crate::conversation::MAX_CONVERSATION_MESSAGES
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
