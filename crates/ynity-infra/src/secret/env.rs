//! Environment variable secrets.
//!
//! Keys are read once at startup and wrapped in [`SecretString`] so they
//! never show up in `Debug` output or logs.

use secrecy::SecretString;

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Read `key` from the environment. Unset, empty or non-Unicode values
/// count as missing.
pub fn read_secret(key: &str) -> Option<SecretString> {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}

/// Keys for the summarization, voice and transcription backends.
#[derive(Default)]
pub struct EnvSecrets {
    pub groq_api_key: Option<SecretString>,
    pub elevenlabs_api_key: Option<SecretString>,
    pub openai_api_key: Option<SecretString>,
}

impl EnvSecrets {
    pub fn from_env() -> Self {
        let secrets = Self {
            groq_api_key: read_secret(GROQ_API_KEY),
            elevenlabs_api_key: read_secret(ELEVENLABS_API_KEY),
            openai_api_key: read_secret(OPENAI_API_KEY),
        };
        if secrets.groq_api_key.is_none() {
            tracing::warn!("{GROQ_API_KEY} is not set; summarization calls will fail");
        }
        if secrets.elevenlabs_api_key.is_none() {
            tracing::warn!("{ELEVENLABS_API_KEY} is not set; voice replies will fail");
        }
        if secrets.openai_api_key.is_none() {
            tracing::warn!("{OPENAI_API_KEY} is not set; audio transcription will fail");
        }
        secrets
    }
}
