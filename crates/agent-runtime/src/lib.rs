//! # agent-runtime
//!
//! Runtime providers for the agent system.
//!
//! ## Providers
//!
//! - **OpenAI** (default): any OpenAI-compatible chat completion endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::{OpenAiConfig, OpenAiProvider};
//!
//! let provider = OpenAiProvider::new(OpenAiConfig::default().with_api_key(key))?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, LlmProvider, Message, Result, Role, Tool, ToolRegistry,
};
