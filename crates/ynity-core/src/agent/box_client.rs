//! BoxAgentClient -- object-safe dynamic dispatch wrapper for AgentClient.
//!
//! Same blanket-impl pattern as the other boxed ports:
//! 1. Define an object-safe `AgentClientDyn` trait with boxed futures
//! 2. Blanket-impl `AgentClientDyn` for all `T: AgentClient`
//! 3. `BoxAgentClient` wraps `Box<dyn AgentClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use ynity_types::error::AgentError;

use super::client::AgentClient;

/// Object-safe version of [`AgentClient`] with boxed futures.
pub trait AgentClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn chat_boxed<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AgentError>> + Send + 'a>>;
}

impl<T: AgentClient> AgentClientDyn for T {
    fn name(&self) -> &str {
        AgentClient::name(self)
    }

    fn chat_boxed<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AgentError>> + Send + 'a>> {
        Box::pin(self.chat(prompt))
    }
}

/// Type-erased agent client.
///
/// Lets the router hold the coaching and question-answering agents as the
/// same type even when they are backed by different implementations.
pub struct BoxAgentClient {
    inner: Box<dyn AgentClientDyn + Send + Sync>,
}

impl BoxAgentClient {
    /// Wrap a concrete `AgentClient` in a type-erased box.
    pub fn new<T: AgentClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn chat(&self, prompt: &str) -> Result<Option<String>, AgentError> {
        self.inner.chat_boxed(prompt).await
    }
}
