//! Per-turn agent selection.
//!
//! `AgentRouter` sends each turn to exactly one agent. Support-intent
//! turns go to the coaching agent with the bare question; everything else
//! goes to the question-answering agent with the replayed history.

use chrono::NaiveDate;
use tracing::{debug, warn};

use ynity_types::conversation::{DEFAULT_CONVERSATION_TITLE, Message, MessageRole};
use ynity_types::error::AgentError;

use super::box_client::BoxAgentClient;

/// Reply used when the coaching agent fails or answers with nothing.
pub const COACH_FALLBACK_REPLY: &str = "I'm here to encourage you and help you move forward!";

/// Reply used when the question-answering agent answers with nothing.
pub const ASSISTANT_FALLBACK_REPLY: &str = "I'm not sure I understand your question.";

/// Maximum length (characters) of a generated conversation title.
pub const MAX_TITLE_CHARS: usize = 50;

/// Outcome of routing one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedReply {
    pub reply: String,
    /// `Coach` for the support path, `Bot` for the informational path.
    pub source: MessageRole,
    /// Set only when the turn opened a new conversation.
    pub title: Option<String>,
}

/// Routes turns between the coaching and question-answering agents.
pub struct AgentRouter {
    coach: BoxAgentClient,
    assistant: BoxAgentClient,
}

impl AgentRouter {
    pub fn new(coach: BoxAgentClient, assistant: BoxAgentClient) -> Self {
        Self { coach, assistant }
    }

    /// The question-answering agent (also used for standalone voice replies).
    pub fn assistant(&self) -> &BoxAgentClient {
        &self.assistant
    }

    /// Route one turn.
    ///
    /// `history` holds the messages already in the conversation, excluding
    /// the current question. `today` seeds the support-path title.
    ///
    /// Only an informational-path reply failure is an error; every coach
    /// failure and every title failure degrades to a fixed string.
    #[tracing::instrument(
        name = "route_turn",
        skip(self, history, question),
        fields(history_len = history.len())
    )]
    pub async fn route(
        &self,
        history: &[Message],
        question: &str,
        is_support: bool,
        is_new: bool,
        today: NaiveDate,
    ) -> Result<RoutedReply, AgentError> {
        if is_support {
            return Ok(self.route_support(question, is_new, today).await);
        }

        let prompt = build_history_prompt(history, question);
        let reply = match self.assistant.chat(&prompt).await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                debug!(agent = self.assistant.name(), "Empty reply, using fallback");
                ASSISTANT_FALLBACK_REPLY.to_string()
            }
        };

        let title = if is_new {
            Some(self.generate_title(question).await)
        } else {
            None
        };

        Ok(RoutedReply {
            reply,
            source: MessageRole::Bot,
            title,
        })
    }

    async fn route_support(&self, question: &str, is_new: bool, today: NaiveDate) -> RoutedReply {
        let reply = match self.coach.chat(question).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => COACH_FALLBACK_REPLY.to_string(),
            Err(e) => {
                warn!(agent = self.coach.name(), error = %e, "Coach agent failed, using fallback");
                COACH_FALLBACK_REPLY.to_string()
            }
        };

        RoutedReply {
            reply,
            source: MessageRole::Coach,
            title: is_new.then(|| support_title(today)),
        }
    }

    /// One extra call to the question-answering agent. Never fails.
    async fn generate_title(&self, question: &str) -> String {
        let prompt = format!("Generate a short title for this conversation: {question}");
        match self.assistant.chat(&prompt).await {
            Ok(Some(text)) if !text.trim().is_empty() => truncate_title(&text),
            Ok(_) => DEFAULT_CONVERSATION_TITLE.to_string(),
            Err(e) => {
                warn!(error = %e, "Title generation failed, using default title");
                DEFAULT_CONVERSATION_TITLE.to_string()
            }
        }
    }
}

/// Render prior messages as `"<Role>: <content>"` lines followed by the
/// current question.
pub fn build_history_prompt(history: &[Message], question: &str) -> String {
    let mut prompt = String::new();
    for message in history {
        prompt.push_str(message.role.prompt_label());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt.push_str("User: ");
    prompt.push_str(question);
    prompt
}

/// Title given to a conversation opened by a support-intent turn.
pub fn support_title(today: NaiveDate) -> String {
    format!("Motivational Support - {}", today.format("%-m/%-d/%Y"))
}

fn truncate_title(raw: &str) -> String {
    raw.chars().take(MAX_TITLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAgent;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    fn router(coach: &MockAgent, assistant: &MockAgent) -> AgentRouter {
        AgentRouter::new(
            BoxAgentClient::new(coach.clone()),
            BoxAgentClient::new(assistant.clone()),
        )
    }

    #[test]
    fn test_history_prompt_format() {
        let history = vec![
            Message::text(MessageRole::User, "Hi"),
            Message::text(MessageRole::Bot, "Hello!"),
            Message::text(MessageRole::Coach, "Keep going"),
        ];
        let prompt = build_history_prompt(&history, "What is Rust?");
        assert_eq!(
            prompt,
            "User: Hi\nAssistant: Hello!\nAssistant: Keep going\nUser: What is Rust?"
        );
    }

    #[test]
    fn test_history_prompt_empty_history() {
        assert_eq!(build_history_prompt(&[], "Hello"), "User: Hello");
    }

    #[test]
    fn test_support_title_uses_date() {
        assert_eq!(support_title(today()), "Motivational Support - 3/7/2026");
    }

    #[test]
    fn test_truncate_title_counts_chars() {
        let long = "é".repeat(80);
        assert_eq!(truncate_title(&long).chars().count(), MAX_TITLE_CHARS);
        assert_eq!(truncate_title("Short"), "Short");
    }

    #[tokio::test]
    async fn test_support_turn_calls_coach_once_and_never_assistant() {
        let coach = MockAgent::new("coach").reply("You can do it");
        let assistant = MockAgent::new("assistant").reply("unused");
        let routed = router(&coach, &assistant)
            .route(&[], "I'm tired", true, true, today())
            .await
            .unwrap();

        assert_eq!(routed.reply, "You can do it");
        assert_eq!(routed.source, MessageRole::Coach);
        assert_eq!(routed.title.as_deref(), Some("Motivational Support - 3/7/2026"));
        assert_eq!(coach.prompts(), vec!["I'm tired".to_string()]);
        assert_eq!(assistant.call_count(), 0);
    }

    #[tokio::test]
    async fn test_support_turn_failure_uses_fallback() {
        let coach = MockAgent::new("coach").fail("connection refused");
        let assistant = MockAgent::new("assistant");
        let routed = router(&coach, &assistant)
            .route(&[], "je craque", true, false, today())
            .await
            .unwrap();

        assert_eq!(routed.reply, COACH_FALLBACK_REPLY);
        assert!(routed.title.is_none());
        assert_eq!(assistant.call_count(), 0);
    }

    #[tokio::test]
    async fn test_support_turn_empty_reply_uses_fallback() {
        let coach = MockAgent::new("coach").empty();
        let assistant = MockAgent::new("assistant");
        let routed = router(&coach, &assistant)
            .route(&[], "i feel lost", true, false, today())
            .await
            .unwrap();
        assert_eq!(routed.reply, COACH_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_informational_new_conversation_calls_assistant_twice() {
        let coach = MockAgent::new("coach");
        let assistant = MockAgent::new("assistant")
            .reply("Rust is a systems language.")
            .reply("About Rust");
        let routed = router(&coach, &assistant)
            .route(&[], "What is Rust?", false, true, today())
            .await
            .unwrap();

        assert_eq!(routed.reply, "Rust is a systems language.");
        assert_eq!(routed.source, MessageRole::Bot);
        assert_eq!(routed.title.as_deref(), Some("About Rust"));
        let prompts = assistant.prompts();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "User: What is Rust?");
        assert_eq!(
            prompts[1],
            "Generate a short title for this conversation: What is Rust?"
        );
        assert_eq!(coach.call_count(), 0);
    }

    #[tokio::test]
    async fn test_informational_continuing_conversation_calls_assistant_once() {
        let coach = MockAgent::new("coach");
        let assistant = MockAgent::new("assistant").reply("Sure.");
        let history = vec![
            Message::text(MessageRole::User, "Hi"),
            Message::text(MessageRole::Bot, "Hello"),
        ];
        let routed = router(&coach, &assistant)
            .route(&history, "Explain traits", false, false, today())
            .await
            .unwrap();

        assert!(routed.title.is_none());
        assert_eq!(
            assistant.prompts(),
            vec!["User: Hi\nAssistant: Hello\nUser: Explain traits".to_string()]
        );
    }

    #[tokio::test]
    async fn test_informational_empty_reply_uses_fallback() {
        let coach = MockAgent::new("coach");
        let assistant = MockAgent::new("assistant").empty();
        let routed = router(&coach, &assistant)
            .route(&[], "??", false, false, today())
            .await
            .unwrap();
        assert_eq!(routed.reply, ASSISTANT_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_informational_transport_failure_is_error() {
        let coach = MockAgent::new("coach");
        let assistant = MockAgent::new("assistant").fail("timeout");
        let result = router(&coach, &assistant)
            .route(&[], "What is Rust?", false, true, today())
            .await;
        assert!(matches!(result, Err(AgentError::Transport(_))));
        // No title call after a failed reply
        assert_eq!(assistant.call_count(), 1);
    }

    #[tokio::test]
    async fn test_title_failure_falls_back_to_default() {
        let coach = MockAgent::new("coach");
        let assistant = MockAgent::new("assistant").reply("Answer").fail("boom");
        let routed = router(&coach, &assistant)
            .route(&[], "Question", false, true, today())
            .await
            .unwrap();
        assert_eq!(routed.title.as_deref(), Some(DEFAULT_CONVERSATION_TITLE));
    }

    #[tokio::test]
    async fn test_title_is_truncated() {
        let coach = MockAgent::new("coach");
        let assistant = MockAgent::new("assistant")
            .reply("Answer")
            .reply(&"x".repeat(120));
        let routed = router(&coach, &assistant)
            .route(&[], "Question", false, true, today())
            .await
            .unwrap();
        assert_eq!(routed.title.unwrap().len(), MAX_TITLE_CHARS);
    }
}
