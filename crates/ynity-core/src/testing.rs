//! In-memory test doubles for the core ports.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use ynity_types::chapter::Chapter;
use ynity_types::conversation::{Conversation, ConversationSummary, Message};
use ynity_types::error::{
    AgentError, ArtifactError, CompletionError, RepositoryError, TranscriptionError,
};

use crate::agent::client::{AgentClient, ChapterAgent};
use crate::chapter::repository::ChapterRepository;
use crate::chat::artifact::ArtifactBackend;
use crate::chat::repository::ConversationRepository;
use crate::summarize::completion::CompletionClient;
use crate::transcribe::client::{AudioUpload, TranscriptionClient};

// --- Agents ---

type AgentResult = Result<Option<String>, AgentError>;

/// Scripted agent. Responses are served in order; once the script runs out
/// the last response repeats (or `Ok(None)` if nothing was scripted).
#[derive(Clone)]
pub struct MockAgent {
    name: String,
    script: Arc<Mutex<VecDeque<AgentResult>>>,
    last: Arc<Mutex<Option<AgentResult>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            last: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(self, result: AgentResult) -> Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(Some(text.to_string())))
    }

    pub fn empty(self) -> Self {
        self.push(Ok(None))
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Err(AgentError::Transport(message.to_string())))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> AgentResult {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut last = self.last.lock().unwrap();
        match self.script.lock().unwrap().pop_front() {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last.clone().unwrap_or(Ok(None)),
        }
    }
}

impl AgentClient for MockAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn chat(&self, prompt: &str) -> impl Future<Output = AgentResult> + Send {
        let result = self.next(prompt);
        async move { result }
    }
}

impl ChapterAgent for MockAgent {
    fn generate_chapter(&self, description: &str) -> impl Future<Output = AgentResult> + Send {
        let result = self.next(description);
        async move { result }
    }
}

// --- Artifacts ---

/// Artifact backend with per-kind success switches. Records every call as
/// `"<kind>:<input>"`.
#[derive(Clone)]
pub struct MockArtifacts {
    pub fail_voice: bool,
    pub fail_document: bool,
    pub image_url: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockArtifacts {
    pub fn working() -> Self {
        Self {
            fail_voice: false,
            fail_document: false,
            image_url: Some("https://images.example/generated.png".to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ArtifactBackend for MockArtifacts {
    fn synthesize_speech(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<u8>, ArtifactError>> + Send {
        self.record(format!("speech:{text}"));
        let result = if self.fail_voice {
            Err(ArtifactError::Voice("quota exceeded".to_string()))
        } else {
            Ok(b"ID3fake-mp3".to_vec())
        };
        async move { result }
    }

    fn store_audio(
        &self,
        file_name: &str,
        _audio: &[u8],
    ) -> impl Future<Output = Result<String, ArtifactError>> + Send {
        self.record(format!("store:{file_name}"));
        let url = format!("/audio/{file_name}");
        async move { Ok(url) }
    }

    fn generate_document(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<String, ArtifactError>> + Send {
        self.record(format!("document:{text}"));
        let result = if self.fail_document {
            Err(ArtifactError::Document("disk full".to_string()))
        } else {
            Ok("/files/reply.txt".to_string())
        };
        async move { result }
    }

    fn generate_image(&self, prompt: &str) -> impl Future<Output = Option<String>> + Send {
        self.record(format!("image:{prompt}"));
        let url = self.image_url.clone();
        async move { url }
    }
}

// --- Conversation repository ---

/// Map-backed conversation store with the same version check as SQLite.
#[derive(Clone, Default)]
pub struct InMemoryConversations {
    inner: Arc<Mutex<HashMap<Uuid, Conversation>>>,
    race_after_read: Arc<AtomicBool>,
}

impl InMemoryConversations {
    /// After the next read, bump the stored version as if another turn
    /// had written in between.
    pub fn simulate_concurrent_writer(&self) {
        self.race_after_read.store(true, Ordering::SeqCst);
    }

    pub fn insert(&self, conversation: Conversation) {
        self.inner.lock().unwrap().insert(conversation.id, conversation);
    }

    pub fn get(&self, id: &Uuid) -> Option<Conversation> {
        self.inner.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

impl ConversationRepository for InMemoryConversations {
    fn create(
        &self,
        conversation: &Conversation,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        self.insert(conversation.clone());
        async { Ok(()) }
    }

    fn find_by_id_and_owner(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> impl Future<Output = Result<Option<Conversation>, RepositoryError>> + Send {
        let found = self.get(id).filter(|c| c.owner_id == owner_id);
        if found.is_some() && self.race_after_read.swap(false, Ordering::SeqCst) {
            if let Some(stored) = self.inner.lock().unwrap().get_mut(id) {
                stored.version += 1;
            }
        }
        async move { Ok(found) }
    }

    fn latest_for_owner(
        &self,
        owner_id: &str,
    ) -> impl Future<Output = Result<Option<Conversation>, RepositoryError>> + Send {
        let latest = self
            .inner
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.owner_id == owner_id)
            .max_by_key(|c| c.created_at)
            .cloned();
        async move { Ok(latest) }
    }

    fn list_for_owner(
        &self,
        owner_id: &str,
    ) -> impl Future<Output = Result<Vec<ConversationSummary>, RepositoryError>> + Send {
        let mut list: Vec<ConversationSummary> = self
            .inner
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.owner_id == owner_id)
            .map(|c| ConversationSummary {
                id: c.id,
                title: c.title.clone(),
                message_count: c.messages.len() as u32,
                created_at: c.created_at,
            })
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        async move { Ok(list) }
    }

    fn append_messages(
        &self,
        id: &Uuid,
        expected_version: u64,
        messages: &[Message],
    ) -> impl Future<Output = Result<u64, RepositoryError>> + Send {
        let mut map = self.inner.lock().unwrap();
        let result = match map.get_mut(id) {
            None => Err(RepositoryError::NotFound),
            Some(c) if c.version != expected_version => Err(RepositoryError::Conflict(format!(
                "conversation {id} is at version {}, expected {expected_version}",
                c.version
            ))),
            Some(c) => {
                c.messages.extend_from_slice(messages);
                c.version += 1;
                Ok(c.version)
            }
        };
        async move { result }
    }

    fn update_title(
        &self,
        id: &Uuid,
        owner_id: &str,
        title: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send {
        let mut map = self.inner.lock().unwrap();
        let updated = match map.get_mut(id) {
            Some(c) if c.owner_id == owner_id => {
                c.title = Some(title.to_string());
                true
            }
            _ => false,
        };
        async move { Ok(updated) }
    }

    fn delete(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send {
        let mut map = self.inner.lock().unwrap();
        let owned = map.get(id).is_some_and(|c| c.owner_id == owner_id);
        if owned {
            map.remove(id);
        }
        async move { Ok(owned) }
    }
}

// --- Chapter repository ---

#[derive(Clone, Default)]
pub struct InMemoryChapters {
    inner: Arc<Mutex<Vec<Chapter>>>,
}

impl InMemoryChapters {
    pub fn all(&self) -> Vec<Chapter> {
        self.inner.lock().unwrap().clone()
    }
}

impl ChapterRepository for InMemoryChapters {
    fn save(&self, chapter: &Chapter) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        self.inner.lock().unwrap().push(chapter.clone());
        async { Ok(()) }
    }

    fn list_for_owner(
        &self,
        owner_id: &str,
    ) -> impl Future<Output = Result<Vec<Chapter>, RepositoryError>> + Send {
        let mut list: Vec<Chapter> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        async move { Ok(list) }
    }

    fn delete(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send {
        let mut chapters = self.inner.lock().unwrap();
        let before = chapters.len();
        chapters.retain(|c| !(c.id == *id && c.owner_id == owner_id));
        let deleted = chapters.len() < before;
        async move { Ok(deleted) }
    }
}

// --- Completion client ---

/// Scripted chat-completion client. Records `(system, prompt)` pairs.
#[derive(Clone, Default)]
pub struct MockCompletion {
    script: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockCompletion {
    pub fn then_ok(self, text: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn then_rate_limited(self, detail: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(CompletionError::RateLimited {
                detail: detail.to_string(),
            }));
        self
    }

    pub fn then_fail(self, detail: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(CompletionError::Upstream(detail.to_string())));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CompletionClient for MockCompletion {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("summary of: {prompt}")));
        async move { next }
    }
}

// --- Transcription client ---

/// Fixed-result transcription client. Records uploaded file names.
#[derive(Clone)]
pub struct MockTranscription {
    result: Result<String, String>,
    file_names: Arc<Mutex<Vec<String>>>,
}

impl MockTranscription {
    pub fn returning(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            file_names: Arc::default(),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            result: Err(detail.to_string()),
            file_names: Arc::default(),
        }
    }

    pub fn file_names(&self) -> Vec<String> {
        self.file_names.lock().unwrap().clone()
    }
}

impl TranscriptionClient for MockTranscription {
    fn transcribe(
        &self,
        audio: AudioUpload,
    ) -> impl Future<Output = Result<String, TranscriptionError>> + Send {
        self.file_names.lock().unwrap().push(audio.file_name);
        let result = self.result.clone().map_err(TranscriptionError::Upstream);
        async move { result }
    }
}
