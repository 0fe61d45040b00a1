//! Crypto Analysis Crew
//!
//! Entry point for one analysis run: validate the form values, build a
//! per-run executor from the run's credentials, and drive the pipeline.

use std::sync::Arc;

use tracing::Instrument;

use crate::config::CrewConfig;
use crate::error::Result;
use crate::executor::{ExecutorFactory, LlmExecutorFactory};
use crate::model::AnalysisRequest;
use crate::pipeline::SequentialPipeline;
use crate::roster::Roster;

pub struct CryptoAnalysisCrew {
    pipeline: SequentialPipeline,
    factory: Arc<dyn ExecutorFactory>,
}

impl CryptoAnalysisCrew {
    /// Standard six-task crew using the given executor factory
    pub fn new(factory: Arc<dyn ExecutorFactory>) -> Result<Self> {
        Ok(Self::with_roster(Arc::new(Roster::standard()?), factory))
    }

    pub fn with_roster(roster: Arc<Roster>, factory: Arc<dyn ExecutorFactory>) -> Self {
        Self {
            pipeline: SequentialPipeline::new(roster),
            factory,
        }
    }

    /// Standard crew backed by the model service and real lookups
    pub fn from_config(config: CrewConfig) -> Result<Self> {
        Self::new(Arc::new(LlmExecutorFactory::new(config)))
    }

    pub fn roster(&self) -> &Roster {
        self.pipeline.roster()
    }

    /// Validate the three form values and run the full analysis
    pub async fn analyze(
        &self,
        cryptocurrency: &str,
        model_key: &str,
        search_key: &str,
    ) -> Result<String> {
        let request = AnalysisRequest::new(cryptocurrency, model_key, search_key)?;
        self.run(&request).await
    }

    /// Run the pipeline for an already validated request
    pub async fn run(&self, request: &AnalysisRequest) -> Result<String> {
        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("analysis", %run_id, asset = %request.asset());

        async {
            tracing::info!(tasks = self.roster().tasks().len(), "Analysis started");

            let executor = self.factory.build(request.credentials())?;
            let result = self.pipeline.run(request.asset(), executor.as_ref()).await;

            match &result {
                Ok(report) => tracing::info!(chars = report.len(), "Analysis finished"),
                Err(e) => tracing::error!(code = e.code(), error = %e, "Analysis failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
