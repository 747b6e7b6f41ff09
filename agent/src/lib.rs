//! # Conversation Agent
//!
//! A retrieval-augmented chat helper. Every question is embedded, similar
//! passages are pulled from the vector store, and the growing transcript is
//! sent to a chat completion endpoint. Without an API key the agent answers
//! with a deterministic mock reply instead.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ragchat_agent::{AgentConfig, create_conversation_agent};
//!
//! let config = AgentConfig::from_env();
//! let mut agent = create_conversation_agent(&config)?;
//!
//! let reply = agent.ask("What is the capital of France?").await?;
//! println!("{reply}");
//! ```

pub mod agent;
pub mod completion;
pub mod config;
pub mod error;
pub mod transcript;

pub use agent::{
    CONTEXT_PREFIX, CompletionResult, ConversationAgent, MOCK_CONTEXT_PREVIEW_CHARS,
    RETRIEVAL_LIMIT, Responder, USER_PREFIX, create_conversation_agent,
};
pub use completion::{
    ChatChoice, ChatCompletion, ChatMessage, CompletionBackend, OpenAIChatClient,
};
pub use config::{AgentConfig, DEFAULT_COMPLETION_MODEL, DEFAULT_SYSTEM_PROMPT};
pub use error::{AgentError, CompletionError, Result};
pub use transcript::{Role, Transcript, Turn};

// Re-export from dependencies for convenience
pub use ragchat_embeddings::{BackendMode, EmbeddingConfig, EmbeddingProvider};
