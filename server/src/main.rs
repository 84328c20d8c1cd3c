mod config;

use config::ServerConfig;
use itinera_core::agents::WeatherAgent;
use itinera_core::api::{self, ApiState};
use itinera_core::{LlmClient, Orchestrator};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logging / tracing
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,itinera_core=info,itinera_server=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(target: "server", "Starting Travel Planner API server");

    // Load configuration (defaults + env + optional TOML overlay)
    let cfg = ServerConfig::load();

    // Missing LLM credential is fatal here, not per-request
    let backend = Arc::new(LlmClient::from_env()?);
    let weather = WeatherAgent::new();
    if !weather.api_active() {
        info!(target: "server", "OPENWEATHER_API_KEY not set; weather agent will serve synthetic forecasts");
    }

    let orchestrator = Arc::new(Orchestrator::with_config(
        cfg.stages.clone(),
        backend,
        Arc::new(weather),
    ));

    api::serve(ApiState { orchestrator }, &cfg.addr()).await?;
    Ok(())
}
