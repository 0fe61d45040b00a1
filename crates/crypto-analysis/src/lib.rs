//! # crypto-analysis
//!
//! A crew of six analyst agents that researches one cryptocurrency and
//! produces an investment report.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ 1 Market     │──▶│ 2 Technology │──▶│ 3 Regulatory │──┐
//! │   trend      │   │   analysis   │   │   analysis   │  │
//! └──────────────┘   └──────────────┘   └──────────────┘  │
//!        ┌────────────────────────────────────────────────┘
//!        ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ 4 Risk       │──▶│ 5 Price      │──▶│ 6 Investment     │──▶ report
//! │   evaluation │   │   prediction │   │   recommendation │
//! └──────────────┘   └──────────────┘   └──────────────────┘
//! ```
//!
//! Each stage receives every earlier stage's output as context. Stages 1-5
//! may call lookups (web, financial, encyclopedia) within their agent's
//! grant; stage 6 has no tools and only synthesizes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crypto_analysis::{CrewConfig, CryptoAnalysisCrew};
//!
//! let crew = CryptoAnalysisCrew::from_config(CrewConfig::from_env())?;
//! let report = crew.analyze("Bitcoin", &openai_key, &serp_key).await?;
//! ```

pub mod config;
pub mod crew;
pub mod error;
pub mod executor;
pub mod lookup;
pub mod model;
pub mod pipeline;
pub mod roster;
pub mod svckit;

pub use config::{CrewConfig, LookupConfig};
pub use crew::CryptoAnalysisCrew;
pub use error::{AnalysisError, Result};
pub use executor::{ExecutorFactory, LlmExecutorFactory, LlmStageExecutor};
pub use model::{AnalysisRequest, Capability, Credentials, TargetAsset};
pub use pipeline::{SequentialPipeline, StageExecutor, StageInput, StageOutput};
pub use roster::{AgentDescriptor, AgentKind, Roster, TaskDescriptor, TaskKind};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{CapabilityToolset, LookupTool};
}
