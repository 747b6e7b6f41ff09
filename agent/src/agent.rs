//! The retrieval-augmented conversation agent.

use std::sync::Arc;

use tracing::{debug, info};

use ragchat_embeddings::{BackendMode, EmbeddingProvider, create_embedding_provider};

use crate::completion::{CompletionBackend, OpenAIChatClient};
use crate::config::AgentConfig;
use crate::error::{AgentError, CompletionError, Result};
use crate::transcript::{Transcript, Turn};

/// Number of passages retrieved for each question.
pub const RETRIEVAL_LIMIT: usize = 3;

/// Number of characters of retrieved context quoted in a mock reply.
pub const MOCK_CONTEXT_PREVIEW_CHARS: usize = 200;

/// Prefix of every user turn.
pub const USER_PREFIX: &str = "User question: ";

/// Prefix of every retrieved-context turn.
pub const CONTEXT_PREFIX: &str = "retrieved context: ";

/// A reply, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// Produced by the completion backend.
    Live(String),
    /// Formatted locally in mock mode.
    Mock(String),
}

impl CompletionResult {
    pub fn content(&self) -> &str {
        match self {
            CompletionResult::Live(content) | CompletionResult::Mock(content) => content,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            CompletionResult::Live(content) | CompletionResult::Mock(content) => content,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, CompletionResult::Mock(_))
    }
}

/// How replies are produced. Fixed when the agent is built.
#[derive(Clone)]
pub enum Responder {
    /// Send the transcript to a completion backend.
    Live {
        backend: Arc<dyn CompletionBackend>,
        model: String,
    },
    /// Echo the question and a preview of the retrieved context.
    Mock,
}

impl Responder {
    pub fn mode(&self) -> BackendMode {
        match self {
            Responder::Live { .. } => BackendMode::Live,
            Responder::Mock => BackendMode::Mock,
        }
    }
}

/// Holds one conversation and answers questions within it.
///
/// Calls to [`ConversationAgent::ask`] take `&mut self`; share an agent
/// between tasks only behind a mutex.
pub struct ConversationAgent {
    transcript: Transcript,
    embeddings: EmbeddingProvider,
    responder: Responder,
}

impl ConversationAgent {
    pub fn new(
        system_prompt: impl Into<String>,
        embeddings: EmbeddingProvider,
        responder: Responder,
    ) -> Self {
        Self {
            transcript: Transcript::new(system_prompt),
            embeddings,
            responder,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn embeddings(&self) -> &EmbeddingProvider {
        &self.embeddings
    }

    pub fn mode(&self) -> BackendMode {
        self.responder.mode()
    }

    /// Answer `query` in the context of the conversation so far.
    ///
    /// Appends the user turn, the retrieved-context turn and the reply. On
    /// error nothing is appended.
    pub async fn ask(&mut self, query: &str) -> Result<String> {
        let user_turn = Turn::user(format!("{USER_PREFIX}{query}"));

        let snippets = self
            .embeddings
            .search_similar(query, RETRIEVAL_LIMIT)
            .await?;
        debug!("Retrieved {} context passages", snippets.len());

        // The context turn reuses the assistant role.
        let context_turn = Turn::assistant(format!("{CONTEXT_PREFIX}{}", snippets.join("\n")));

        let pending = [user_turn, context_turn];
        let reply = self.respond(query, &pending).await?;
        if reply.is_mock() {
            debug!("Answered with mock reply");
        }

        let reply = reply.into_content();
        let [user_turn, context_turn] = pending;
        self.transcript
            .extend([user_turn, context_turn, Turn::assistant(reply.as_str())]);

        Ok(reply)
    }

    async fn respond(&self, query: &str, pending: &[Turn; 2]) -> Result<CompletionResult> {
        match &self.responder {
            Responder::Mock => Ok(CompletionResult::Mock(mock_reply(query, &pending[1].content))),
            Responder::Live { backend, model } => {
                let request = self.transcript.with_pending(pending);
                let completion = backend.create_completion(model, &request).await?;
                let content = completion.first_content().ok_or_else(|| {
                    CompletionError::InvalidResponse("no choices in completion".to_string())
                })?;
                Ok(CompletionResult::Live(content.to_string()))
            }
        }
    }
}

/// The canned reply used in mock mode.
fn mock_reply(query: &str, context: &str) -> String {
    let preview: String = context.chars().take(MOCK_CONTEXT_PREVIEW_CHARS).collect();
    format!("[mock reply] I received your question: '{query}'. Context: {preview}")
}

/// Build the agent described by `config`.
///
/// Live mode talks to the OpenAI-compatible endpoint for both embeddings and
/// completions; mock mode makes no network calls apart from an optional
/// vector store.
pub fn create_conversation_agent(config: &AgentConfig) -> Result<ConversationAgent> {
    let embeddings = create_embedding_provider(&config.embedding)?;

    let responder = match config.mode() {
        BackendMode::Live => {
            let client = OpenAIChatClient::from_config(&config.embedding).ok_or_else(|| {
                AgentError::Config("live mode requires an API key".to_string())
            })?;
            Responder::Live {
                backend: Arc::new(client),
                model: config.completion_model.clone(),
            }
        }
        BackendMode::Mock => Responder::Mock,
    };

    info!("Conversation agent ready (mode: {})", responder.mode());

    Ok(ConversationAgent::new(
        config.system_prompt.as_str(),
        embeddings,
        responder,
    ))
}
