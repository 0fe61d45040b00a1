//! Sequential Pipeline
//!
//! Runs the roster's tasks strictly in order. Each stage sees the asset, its
//! task and agent, and every earlier stage's output. The first failure ends
//! the run; only the last stage's text is returned.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AnalysisError, Result};
use crate::model::TargetAsset;
use crate::roster::{AgentDescriptor, AgentKind, Roster, TaskDescriptor, TaskKind};

/// Text produced by one completed stage
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageOutput {
    pub task: TaskKind,
    pub agent: AgentKind,
    pub role: &'static str,
    pub text: String,
}

/// Everything a stage needs to run
#[derive(Clone, Copy, Debug)]
pub struct StageInput<'a> {
    /// 1-based position in the pipeline
    pub position: usize,
    pub asset: &'a TargetAsset,
    pub task: &'a TaskDescriptor,
    pub agent: &'a AgentDescriptor,
    pub prior_outputs: &'a [StageOutput],
}

impl StageInput<'_> {
    /// User message for the stage: task, asset and the context so far
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "{}\n\nCryptocurrency: {}\nCurrent date: {}",
            self.task.description,
            self.asset,
            chrono::Utc::now().format("%Y-%m-%d"),
        );

        if !self.prior_outputs.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:");
            for output in self.prior_outputs {
                prompt.push_str(&format!("\n\n## {} ({})\n{}", output.role, output.task, output.text));
            }
        }

        prompt
    }
}

/// Runs one stage and returns its text
#[async_trait]
pub trait StageExecutor: Send + Sync {
    async fn execute(&self, input: &StageInput<'_>) -> Result<String>;
}

pub struct SequentialPipeline {
    roster: Arc<Roster>,
}

impl SequentialPipeline {
    pub fn new(roster: Arc<Roster>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Run every task in order and return the final task's output
    pub async fn run(&self, asset: &TargetAsset, executor: &dyn StageExecutor) -> Result<String> {
        let total = self.roster.tasks().len();
        let mut outputs: Vec<StageOutput> = Vec::with_capacity(total);

        for (idx, task) in self.roster.tasks().iter().enumerate() {
            let position = idx + 1;
            let agent = self.roster.agent(task.agent).ok_or_else(|| {
                AnalysisError::stage(
                    position,
                    task.kind,
                    AnalysisError::InvalidRoster(format!("agent {:?} is not declared", task.agent)),
                )
            })?;

            tracing::info!(position, total, task = %task.kind, agent = agent.role, "Stage started");

            let input = StageInput {
                position,
                asset,
                task,
                agent,
                prior_outputs: &outputs,
            };

            let text = match executor.execute(&input).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(position, task = %task.kind, error = %e, "Stage failed");
                    return Err(AnalysisError::stage(position, task.kind, e));
                }
            };

            if text.trim().is_empty() {
                tracing::warn!(position, task = %task.kind, "Stage returned no text");
                return Err(AnalysisError::EmptyStageOutput {
                    step: position,
                    task: task.kind,
                });
            }

            tracing::info!(position, task = %task.kind, chars = text.len(), "Stage finished");

            outputs.push(StageOutput {
                task: task.kind,
                agent: agent.kind,
                role: agent.role,
                text,
            });
        }

        outputs
            .pop()
            .map(|output| output.text)
            .ok_or_else(|| AnalysisError::InvalidRoster("no tasks declared".into()))
    }
}
