//! End-to-end runs of the crew with scripted stage executors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crypto_analysis::{
    AnalysisError, Credentials, CryptoAnalysisCrew, ExecutorFactory, Result, StageExecutor,
    StageInput, TaskKind,
};

/// One observed stage invocation
#[derive(Clone, Debug)]
struct Call {
    position: usize,
    task: TaskKind,
    asset: String,
    prior: Vec<String>,
    prompt: String,
}

/// Replies with a distinct placeholder per stage
struct PlaceholderExecutor {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_at: Option<usize>,
    delay: Duration,
}

#[async_trait]
impl StageExecutor for PlaceholderExecutor {
    async fn execute(&self, input: &StageInput<'_>) -> Result<String> {
        self.calls.lock().unwrap().push(Call {
            position: input.position,
            task: input.task.kind,
            asset: input.asset.to_string(),
            prior: input.prior_outputs.iter().map(|o| o.text.clone()).collect(),
            prompt: input.prompt(),
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail_at == Some(input.position) {
            return Err(AnalysisError::Model("model service returned 500".into()));
        }
        Ok(format!("{} placeholder {}", input.asset, input.position))
    }
}

struct ScriptedFactory {
    calls: Arc<Mutex<Vec<Call>>>,
    builds: AtomicUsize,
    fail_at: Option<usize>,
    delay: Duration,
}

impl ScriptedFactory {
    fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            builds: AtomicUsize::new(0),
            fail_at: None,
            delay: Duration::ZERO,
        }
    }

    fn failing_at(position: usize) -> Self {
        Self {
            fail_at: Some(position),
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ExecutorFactory for ScriptedFactory {
    fn build(&self, _credentials: &Credentials) -> Result<Arc<dyn StageExecutor>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(PlaceholderExecutor {
            calls: Arc::clone(&self.calls),
            fail_at: self.fail_at,
            delay: self.delay,
        }))
    }
}

#[tokio::test]
async fn bitcoin_run_invokes_each_stage_once_in_order() {
    let factory = Arc::new(ScriptedFactory::new());
    let crew = CryptoAnalysisCrew::new(factory.clone()).unwrap();

    let report = crew.analyze("Bitcoin", "sk-test", "serp-test").await.unwrap();

    assert_eq!(report, "Bitcoin placeholder 6");

    let calls = factory.calls();
    let order: Vec<TaskKind> = calls.iter().map(|c| c.task).collect();
    assert_eq!(
        order,
        vec![
            TaskKind::MarketTrendAnalysis,
            TaskKind::TechnologyAnalysis,
            TaskKind::RegulatoryAnalysis,
            TaskKind::RiskEvaluation,
            TaskKind::PricePrediction,
            TaskKind::InvestmentRecommendation,
        ]
    );
    for (idx, call) in calls.iter().enumerate() {
        assert_eq!(call.position, idx + 1);
        assert_eq!(call.asset, "Bitcoin");
        assert_eq!(call.prior.len(), idx);
    }

    let last = &calls[5];
    for n in 1..=5 {
        let placeholder = format!("Bitcoin placeholder {}", n);
        assert!(last.prior.contains(&placeholder));
        assert!(last.prompt.contains(&placeholder));
    }
}

#[tokio::test]
async fn failure_mid_pipeline_skips_later_stages() {
    let factory = Arc::new(ScriptedFactory::failing_at(3));
    let crew = CryptoAnalysisCrew::new(factory.clone()).unwrap();

    let err = crew.analyze("Bitcoin", "sk-test", "serp-test").await.unwrap_err();

    match &err {
        AnalysisError::Orchestration { step, task, .. } => {
            assert_eq!(*step, 3);
            assert_eq!(*task, TaskKind::RegulatoryAnalysis);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.code(), "MODEL_ERROR");

    let positions: Vec<usize> = factory.calls().iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[tokio::test]
async fn blank_fields_fail_before_any_stage() {
    let factory = Arc::new(ScriptedFactory::new());
    let crew = CryptoAnalysisCrew::new(factory.clone()).unwrap();

    for (asset, model_key, search_key) in [
        ("", "sk-test", "serp-test"),
        ("Bitcoin", "", "serp-test"),
        ("Bitcoin", "sk-test", "   "),
    ] {
        let err = crew.analyze(asset, model_key, search_key).await.unwrap_err();
        assert!(err.is_config(), "{err}");
    }

    assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    assert!(factory.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_runs_do_not_share_context() {
    let factory = Arc::new(ScriptedFactory {
        delay: Duration::from_millis(5),
        ..ScriptedFactory::new()
    });
    let crew = Arc::new(CryptoAnalysisCrew::new(factory.clone()).unwrap());

    let (eth, sol) = tokio::join!(
        crew.analyze("Ethereum", "sk-a", "serp-a"),
        crew.analyze("Solana", "sk-b", "serp-b"),
    );

    assert_eq!(eth.unwrap(), "Ethereum placeholder 6");
    assert_eq!(sol.unwrap(), "Solana placeholder 6");
    assert_eq!(factory.builds.load(Ordering::SeqCst), 2);

    for asset in ["Ethereum", "Solana"] {
        let calls: Vec<Call> = factory.calls().into_iter().filter(|c| c.asset == asset).collect();
        let positions: Vec<usize> = calls.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
        for call in &calls {
            assert!(call.prior.iter().all(|p| p.starts_with(asset)), "{asset}: {:?}", call.prior);
        }
    }
}
