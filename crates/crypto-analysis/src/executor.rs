//! LLM Stage Executor
//!
//! Drives one `agent_core::Agent` per stage: the persona becomes the system
//! prompt and the tool registry holds only the task's capabilities.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{AgentBuilder, GenerationOptions, LlmProvider};
use agent_runtime::OpenAiProvider;

use crate::config::CrewConfig;
use crate::error::Result;
use crate::model::Credentials;
use crate::pipeline::{StageExecutor, StageInput};
use crate::svckit::CapabilityToolset;

pub struct LlmStageExecutor {
    provider: Arc<dyn LlmProvider>,
    toolset: CapabilityToolset,
    generation: GenerationOptions,
    max_iterations: usize,
}

impl LlmStageExecutor {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        toolset: CapabilityToolset,
        generation: GenerationOptions,
        max_iterations: usize,
    ) -> Self {
        Self {
            provider,
            toolset,
            generation,
            max_iterations,
        }
    }
}

#[async_trait]
impl StageExecutor for LlmStageExecutor {
    async fn execute(&self, input: &StageInput<'_>) -> Result<String> {
        let tools = self.toolset.registry_for(input.task.capabilities)?;
        tracing::debug!(task = %input.task.kind, tools = ?tools.names(), "Building stage agent");

        let agent = AgentBuilder::new()
            .provider(Arc::clone(&self.provider))
            .tools(tools)
            .system_prompt(input.agent.system_prompt())
            .generation(self.generation.clone())
            .max_iterations(self.max_iterations)
            .build()?;

        Ok(agent.ask(&input.prompt()).await?)
    }
}

/// Builds a fresh executor for each run from that run's credentials
pub trait ExecutorFactory: Send + Sync {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn StageExecutor>>;
}

/// Production factory: OpenAI-compatible model service plus the real lookups
pub struct LlmExecutorFactory {
    config: CrewConfig,
    toolset: Option<CapabilityToolset>,
}

impl LlmExecutorFactory {
    pub fn new(config: CrewConfig) -> Self {
        Self {
            config,
            toolset: None,
        }
    }

    /// Use fixed lookup clients instead of building them per run
    pub fn with_toolset(mut self, toolset: CapabilityToolset) -> Self {
        self.toolset = Some(toolset);
        self
    }
}

impl ExecutorFactory for LlmExecutorFactory {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn StageExecutor>> {
        let provider = OpenAiProvider::new(
            self.config.openai.clone().with_api_key(credentials.model_key()),
        )?;

        let toolset = match &self.toolset {
            Some(toolset) => toolset.clone(),
            None => CapabilityToolset::from_config(&self.config, credentials)?,
        };

        Ok(Arc::new(LlmStageExecutor::new(
            Arc::new(provider),
            toolset,
            self.config.generation.clone(),
            self.config.max_iterations,
        )))
    }
}
