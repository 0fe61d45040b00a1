//! Crypto analysis HTTP server
//!
//! Axum server exposing the analysis crew behind a JSON endpoint and serving
//! the WASM form from the static directory.

mod config;
mod handlers;
mod router;
mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_analysis::{CrewConfig, CryptoAnalysisCrew};

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env();
    let crew_config = CrewConfig::from_env();

    tracing::info!(
        model = %crew_config.generation.model,
        base_url = %crew_config.openai.base_url,
        max_iterations = crew_config.max_iterations,
        "Model service configured"
    );
    if server_config.fallback_openai_key.is_some() || server_config.fallback_serp_key.is_some() {
        tracing::info!("Environment credentials will fill blank form fields");
    }

    let crew = CryptoAnalysisCrew::from_config(crew_config)?;
    for task in crew.roster().tasks() {
        tracing::info!("  • {} → {:?}", task.kind, task.agent);
    }

    let addr = server_config.bind_addr.clone();
    let app = build_router(AppState::new(crew, server_config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("crypto analysis server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health       - Health check");
    tracing::info!("  POST /api/analyze  - Run the six-task analysis");

    axum::serve(listener, app).await?;

    Ok(())
}
