//! Event carbon API: JSON HTTP server.
//!
//! Serves stateless calculation, translation and catalog endpoints plus
//! in-memory intake sessions.

use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ec_api::config::ApiConfig;
use ec_api::inference::{BedrockConfig, BedrockExtractor, build_extractor};
use ec_api::routes::build_router;
use ec_api::state::{AppState, sweep_idle_sessions};
use ec_intake::IntakeConfig;

/// How often idle sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ec-api starting");

    let config = ApiConfig::from_env();

    let intake = match &config.intake_config_path {
        Some(path) => {
            tracing::info!(path = %path, "loading intake config");
            IntakeConfig::from_file(path)?
        }
        None => IntakeConfig::default(),
    };

    let bedrock = if config.bedrock_enabled {
        let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_bedrockruntime::Client::new(&aws);
        Some(BedrockExtractor::new(client, BedrockConfig::from_env()))
    } else {
        None
    };

    let extractor = build_extractor(&intake.ollama, bedrock);
    let state = AppState::with_extractor(
        extractor,
        intake.dialogue_config()?,
        intake.translator_config(),
    );

    let ttl = Duration::from_secs(config.session_ttl_secs);
    tokio::spawn(sweep_idle_sessions(
        state.clone(),
        ttl,
        SESSION_SWEEP_INTERVAL.min(ttl),
    ));

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
