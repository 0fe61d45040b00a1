//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction and a tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │  │    Tools    │  │   LlmProvider       │  │
//! │  │    Loop     │──│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait keeps the reasoning loop independent of the
//! model service, so tests can drive an agent with a scripted provider.

pub mod provider;
pub mod tool;
pub mod reasoning;
pub mod message;
pub mod error;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolRegistry, ToolSchema};
