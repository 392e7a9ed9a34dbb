mod auth;
mod config;
mod errors;
mod llm_client;
mod parser;
mod resumes;
mod routes;
mod state;
mod usage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resumes::improve::{LlmResumeImprover, ResumeImprover};
use crate::routes::build_router;
use crate::state::AppState;
use crate::usage::{InMemoryUsageStore, PlanLimits, RedisUsageStore, UsageStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Fails on malformed env vars; everything else has a default
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    let usage: Arc<dyn UsageStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Usage counters in Redis");
            Arc::new(RedisUsageStore::new(client))
        }
        None => {
            info!("REDIS_URL not set, usage counters kept in memory");
            Arc::new(InMemoryUsageStore::new())
        }
    };
    let limits = PlanLimits::from_config(&config);
    info!(
        "Plan limits: free={} pro={} per {}s",
        limits.free,
        limits.pro,
        limits.window.as_secs()
    );

    let improver: Option<Arc<dyn ResumeImprover>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_model.clone())?;
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(LlmResumeImprover::new(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, resume improvement disabled");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        usage,
        limits,
        improver,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
