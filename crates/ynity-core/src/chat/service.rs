//! Chat service orchestrating turns and conversation management.
//!
//! A turn runs `TriggerClassifier -> AgentRouter -> ResponseComposer`
//! (informational replies only) and then persists the user message and the
//! reply in a single repository write.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use ynity_types::conversation::{
    ArtifactRefs, Conversation, ConversationSummary, DEFAULT_CONVERSATION_TITLE, Message,
    MessageRole,
};
use ynity_types::error::ChatError;

use crate::agent::router::{ASSISTANT_FALLBACK_REPLY, AgentRouter};
use crate::chat::artifact::ArtifactBackend;
use crate::chat::composer::ResponseComposer;
use crate::chat::repository::ConversationRepository;
use crate::chat::trigger::TriggerClassifier;

/// One incoming chat turn.
///
/// A missing `question` deserializes to an empty string so the turn is
/// rejected as a validation error rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "conversation_id")]
    pub conversation_id: Option<Uuid>,
    #[serde(default, alias = "use_voice")]
    pub use_voice: bool,
}

/// Result of a chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub content: String,
    pub source: MessageRole,
    pub conversation_id: Uuid,
    pub title: Option<String>,
    #[serde(flatten)]
    pub artifacts: ArtifactRefs,
}

/// Orchestrates chat turns and conversation CRUD.
///
/// Generic over the repository and artifact backend so that ynity-core
/// never depends on ynity-infra.
pub struct ChatService<R: ConversationRepository, A: ArtifactBackend> {
    repo: R,
    router: AgentRouter,
    composer: ResponseComposer<A>,
    max_messages: usize,
}

impl<R: ConversationRepository, A: ArtifactBackend> ChatService<R, A> {
    pub fn new(
        repo: R,
        router: AgentRouter,
        composer: ResponseComposer<A>,
        max_messages: usize,
    ) -> Self {
        Self {
            repo,
            router,
            composer,
            max_messages,
        }
    }

    /// Access the conversation repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // --- Turns ---

    /// Handle one chat turn using today's local date for support titles.
    pub async fn ask(&self, owner_id: &str, request: AskRequest) -> Result<TurnOutcome, ChatError> {
        self.ask_on(owner_id, request, Local::now().date_naive()).await
    }

    /// Handle one chat turn.
    ///
    /// Opens a fresh conversation when `conversation_id` is absent, unknown,
    /// owned by someone else, or already above the message ceiling. The
    /// previous conversation is never modified in that case.
    #[tracing::instrument(
        name = "chat_turn",
        skip(self, request),
        fields(conversation_id = ?request.conversation_id)
    )]
    pub async fn ask_on(
        &self,
        owner_id: &str,
        request: AskRequest,
        today: NaiveDate,
    ) -> Result<TurnOutcome, ChatError> {
        let question = request.question.trim();
        if question.is_empty() {
            return Err(ChatError::Validation("Missing question".to_string()));
        }

        let existing = match request.conversation_id {
            Some(id) => self.repo.find_by_id_and_owner(&id, owner_id).await?,
            None => None,
        };
        let (mut conversation, is_new) = match existing {
            Some(c) if !c.is_full(self.max_messages) => (c, false),
            Some(c) => {
                info!(conversation_id = %c.id, messages = c.messages.len(), "Conversation full, rotating");
                (Conversation::new(owner_id), true)
            }
            None => (Conversation::new(owner_id), true),
        };

        let is_support = TriggerClassifier::is_support_intent(question);
        let routed = self
            .router
            .route(&conversation.messages, question, is_support, is_new, today)
            .await?;

        let artifacts = if is_support {
            ArtifactRefs::default()
        } else {
            self.composer
                .compose(question, &routed.reply, request.use_voice)
                .await?
        };

        let new_messages = [
            Message::text(MessageRole::User, question),
            Message::text(routed.source, routed.reply.as_str()).with_artifacts(&artifacts),
        ];

        if is_new {
            conversation.title = routed.title;
            conversation.messages.extend(new_messages);
            self.repo.create(&conversation).await?;
            info!(conversation_id = %conversation.id, source = %routed.source, "Conversation created");
        } else {
            self.repo
                .append_messages(&conversation.id, conversation.version, &new_messages)
                .await?;
        }

        Ok(TurnOutcome {
            content: routed.reply,
            source: routed.source,
            conversation_id: conversation.id,
            title: conversation.title,
            artifacts,
        })
    }

    /// Answer a standalone message with synthesized speech. Nothing is persisted.
    pub async fn voice_reply(&self, message: &str) -> Result<Vec<u8>, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::Validation("Empty message".to_string()));
        }

        let prompt = format!("User: {message}");
        let reply = match self.router.assistant().chat(&prompt).await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => ASSISTANT_FALLBACK_REPLY.to_string(),
        };

        Ok(self.composer.backend().synthesize_speech(&reply).await?)
    }

    // --- Conversation management ---

    /// Messages of the owner's most recent conversation (empty if none).
    pub async fn latest_history(&self, owner_id: &str) -> Result<Vec<Message>, ChatError> {
        Ok(self
            .repo
            .latest_for_owner(owner_id)
            .await?
            .map(|c| c.messages)
            .unwrap_or_default())
    }

    pub async fn list_conversations(
        &self,
        owner_id: &str,
    ) -> Result<Vec<ConversationSummary>, ChatError> {
        Ok(self.repo.list_for_owner(owner_id).await?)
    }

    pub async fn get_conversation(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> Result<Conversation, ChatError> {
        self.repo
            .find_by_id_and_owner(id, owner_id)
            .await?
            .ok_or(ChatError::NotFound)
    }

    /// Create an empty conversation. A blank title becomes the default title.
    pub async fn create_conversation(
        &self,
        owner_id: &str,
        title: Option<&str>,
    ) -> Result<Conversation, ChatError> {
        let mut conversation = Conversation::new(owner_id);
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CONVERSATION_TITLE);
        conversation.title = Some(title.to_string());
        self.repo.create(&conversation).await?;
        Ok(conversation)
    }

    /// Rename a conversation and return its updated state.
    pub async fn rename_conversation(
        &self,
        id: &Uuid,
        owner_id: &str,
        title: &str,
    ) -> Result<Conversation, ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::Validation("Missing title".to_string()));
        }
        if !self.repo.update_title(id, owner_id, title).await? {
            return Err(ChatError::NotFound);
        }
        self.get_conversation(id, owner_id).await
    }

    /// Delete a conversation. Returns whether anything was deleted.
    pub async fn delete_conversation(&self, id: &Uuid, owner_id: &str) -> Result<bool, ChatError> {
        let deleted = self.repo.delete(id, owner_id).await?;
        if !deleted {
            warn!(conversation_id = %id, "Delete requested for missing or foreign conversation");
        }
        Ok(deleted)
    }
}
