//! Error Types for the Analysis Crew

use thiserror::Error;

use agent_core::AgentError;

use crate::roster::TaskKind;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Missing or blank input, detected before any external call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Agent/task tables are inconsistent
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    /// A lookup capability failed or timed out
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// The model service failed or returned something unusable
    #[error("Model service error: {0}")]
    Model(String),

    #[error("Task {step} ({task}) produced no output")]
    EmptyStageOutput { step: usize, task: TaskKind },

    #[error("Task {step} ({task}) failed: {source}")]
    Orchestration {
        step: usize,
        task: TaskKind,
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Wrap a stage failure with its position in the pipeline (1-based)
    pub fn stage(step: usize, task: TaskKind, source: AnalysisError) -> Self {
        Self::Orchestration {
            step,
            task,
            source: Box::new(source),
        }
    }

    /// The innermost error, unwrapping stage context
    pub fn root_cause(&self) -> &AnalysisError {
        match self {
            Self::Orchestration { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this is an input problem the caller can fix
    pub fn is_config(&self) -> bool {
        matches!(self.root_cause(), Self::Config(_))
    }

    /// Stable machine-readable code for the root cause
    pub fn code(&self) -> &'static str {
        match self.root_cause() {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidRoster(_) => "INVALID_ROSTER",
            Self::Lookup(_) => "LOOKUP_ERROR",
            Self::Model(_) => "MODEL_ERROR",
            Self::EmptyStageOutput { .. } | Self::Orchestration { .. } => "ORCHESTRATION_ERROR",
        }
    }
}

impl From<AgentError> for AnalysisError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Config(msg) => Self::Config(msg),
            e if e.is_tool_error() => Self::Lookup(e.to_string()),
            e => Self::Model(e.to_string()),
        }
    }
}
