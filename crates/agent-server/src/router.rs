//! Route table

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{analyze_handler, health_check};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Health & info
        .route("/health", get(health_check))

        // Analysis API
        .route("/api/analyze", post(analyze_handler))

        // Static files (WASM frontend)
        .fallback_service(static_files)

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crypto_analysis::{
        AnalysisError, Credentials, CryptoAnalysisCrew, ExecutorFactory, Result, StageExecutor,
        StageInput,
    };

    use crate::config::ServerConfig;

    struct FakeExecutor {
        fail_at: Option<usize>,
        delay: Duration,
    }

    #[async_trait]
    impl StageExecutor for FakeExecutor {
        async fn execute(&self, input: &StageInput<'_>) -> Result<String> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail_at == Some(input.position) {
                return Err(AnalysisError::Lookup("serpapi returned 503".into()));
            }
            Ok(format!("report {} on {}", input.position, input.asset))
        }
    }

    #[derive(Default)]
    struct FakeFactory {
        builds: AtomicUsize,
        keys: Mutex<Vec<(String, String)>>,
        fail_at: Option<usize>,
        delay: Duration,
    }

    impl ExecutorFactory for FakeFactory {
        fn build(&self, credentials: &Credentials) -> Result<Arc<dyn StageExecutor>> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            self.keys.lock().unwrap().push((
                credentials.model_key().to_string(),
                credentials.search_key().to_string(),
            ));
            Ok(Arc::new(FakeExecutor {
                fail_at: self.fail_at,
                delay: self.delay,
            }))
        }
    }

    fn app(factory: Arc<FakeFactory>, config: ServerConfig) -> Router {
        let crew = CryptoAnalysisCrew::new(factory).unwrap();
        build_router(AppState::new(crew, config))
    }

    fn analyze_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_roster_size() {
        let app = app(Arc::new(FakeFactory::default()), ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["agents"], 6);
        assert_eq!(body["tasks"], 6);
    }

    #[tokio::test]
    async fn test_analyze_returns_final_report() {
        let factory = Arc::new(FakeFactory::default());
        let app = app(factory.clone(), ServerConfig::default());

        let response = app
            .oneshot(analyze_request(json!({
                "cryptocurrency": "Bitcoin",
                "openai_api_key": "sk-form",
                "serp_api_key": "serp-form"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["result"], "report 6 on Bitcoin");
        assert_eq!(
            factory.keys.lock().unwrap().as_slice(),
            &[("sk-form".to_string(), "serp-form".to_string())]
        );
    }

    #[tokio::test]
    async fn test_blank_field_is_bad_request() {
        let factory = Arc::new(FakeFactory::default());
        let app = app(factory.clone(), ServerConfig::default());

        let response = app
            .oneshot(analyze_request(json!({
                "cryptocurrency": "Bitcoin",
                "openai_api_key": "sk-form",
                "serp_api_key": ""
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["code"], "CONFIG_ERROR");
        assert!(body["error"].as_str().unwrap().contains("SERP API Key is required"));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_environment_keys_fill_blank_fields() {
        let factory = Arc::new(FakeFactory::default());
        let config = ServerConfig {
            fallback_openai_key: Some("sk-env".into()),
            fallback_serp_key: Some("serp-env".into()),
            ..Default::default()
        };

        let response = app(factory.clone(), config)
            .oneshot(analyze_request(json!({
                "cryptocurrency": "Ethereum",
                "serp_api_key": "serp-form"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            factory.keys.lock().unwrap().as_slice(),
            &[("sk-env".to_string(), "serp-form".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stage_failure_is_bad_gateway() {
        let factory = Arc::new(FakeFactory {
            fail_at: Some(4),
            ..Default::default()
        });

        let response = app(factory, ServerConfig::default())
            .oneshot(analyze_request(json!({
                "cryptocurrency": "Bitcoin",
                "openai_api_key": "sk",
                "serp_api_key": "serp"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert_eq!(body["code"], "LOOKUP_ERROR");
        assert!(body["error"].as_str().unwrap().contains("Task 4 (risk_evaluation) failed"));
    }

    #[tokio::test]
    async fn test_slow_run_times_out() {
        let factory = Arc::new(FakeFactory {
            delay: Duration::from_millis(200),
            ..Default::default()
        });
        let config = ServerConfig {
            analysis_timeout: Some(Duration::from_millis(50)),
            ..Default::default()
        };

        let response = app(factory, config)
            .oneshot(analyze_request(json!({
                "cryptocurrency": "Bitcoin",
                "openai_api_key": "sk",
                "serp_api_key": "serp"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(read_json(response).await["code"], "ANALYSIS_TIMEOUT");
    }
}
