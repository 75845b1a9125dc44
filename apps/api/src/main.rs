mod config;
mod dispatch;
mod errors;
mod form;
mod gemini_client;
mod models;
mod relay;
mod render;
mod routes;
mod search;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dispatch::HttpRelay;
use crate::gemini_client::GeminiClient;
use crate::relay::{EmailProvider, ResendClient};
use crate::routes::build_router;
use crate::search::board::JobBoard;
use crate::search::GeminiJobSearcher;
use crate::state::AppState;
use crate::store::{FileStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Automator v{}", env!("CARGO_PKG_VERSION"));

    // Resume draft store
    let store = ResumeStore::load(Box::new(FileStore::open(&config.data_dir)?))?;
    info!("Resume store ready at {}", config.data_dir);

    // Job search
    let gemini = GeminiClient::new(config.gemini_api_key.clone());
    if gemini.is_configured() {
        info!("Gemini client initialized (model: {})", gemini_client::MODEL);
    } else {
        warn!("GEMINI_API_KEY not set; job searches will fail");
    }

    // Email relay
    let mailer: Option<Arc<dyn EmailProvider>> = match &config.resend_api_key {
        Some(key) => {
            info!("Resend client initialized");
            Some(Arc::new(ResendClient::new(key.clone())))
        }
        None => {
            warn!("RESEND_API_KEY not set; /api/send-resume will refuse to send");
            None
        }
    };

    let state = AppState {
        store: Arc::new(store),
        jobs: Arc::new(JobBoard::new()),
        searcher: Arc::new(GeminiJobSearcher::new(gemini)),
        relay: Arc::new(HttpRelay::new(config.relay_url.clone())),
        mailer,
        config: config.clone(),
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
