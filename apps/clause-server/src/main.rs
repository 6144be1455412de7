//! Clause Risk Analyzer Server
//!
//! Upload a contract, pick a keyword, and get back every clause that
//! mentions it with a risk tier, a simplified rewording and a short
//! structural explanation. Provides REST API endpoints for:
//!
//! - Session lifecycle (create, inspect, reset, end)
//! - Document upload and text extraction (PDF, DOCX, TXT, CSV)
//! - Local keyword clause analysis
//! - Remote clause analysis through a hosted model
//!
//! ## Architecture
//!
//! Handlers are thin. Extraction lives in `doc-extract`, the local pipeline
//! in `clause-engine` and the hosted-model path in `remote-analyzer`. The
//! server only keeps sessions and maps errors to HTTP responses.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clause_engine::{ClauseEngine, MatchPolicy, Segmentation};
use remote_analyzer::{RemoteAnalyzer, RemoteConfig};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

use state::{AppState, SessionStore};

/// Command-line arguments for the clause server
#[derive(Parser, Debug)]
#[command(name = "clause-server")]
#[command(about = "Clause risk analyzer for uploaded contracts")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Keyword matching: "substring" or "lemma"
    #[arg(long, default_value = "substring")]
    match_policy: MatchPolicy,

    /// Segment with the linguistic analyzer instead of punctuation
    #[arg(long)]
    linguistic_segmentation: bool,

    /// Timeout for each remote model request, in seconds
    #[arg(long, default_value = "30")]
    remote_timeout_secs: u64,

    /// Minutes of inactivity before a session and its document are dropped
    #[arg(long, default_value = "60")]
    session_ttl_mins: i64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Remote analysis is optional; without a key the remote endpoints answer 503
fn build_remote(timeout: Duration) -> Option<Arc<RemoteAnalyzer>> {
    let config = match RemoteConfig::from_env() {
        Ok(config) => config.with_timeout(timeout),
        Err(e) => {
            warn!("Remote analysis disabled: {}", e);
            return None;
        }
    };

    info!("Remote analysis enabled ({:?})", config);
    match RemoteAnalyzer::from_config(config) {
        Ok(analyzer) => Some(Arc::new(analyzer)),
        Err(e) => {
            warn!("Remote analysis disabled: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clause server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let segmentation = if args.linguistic_segmentation {
        Segmentation::Linguistic
    } else {
        Segmentation::Punctuation
    };
    let engine = ClauseEngine::standard()
        .with_match_policy(args.match_policy)
        .with_segmentation(segmentation);

    let remote = build_remote(Duration::from_secs(args.remote_timeout_secs));
    let sessions = SessionStore::with_ttl(chrono::Duration::minutes(args.session_ttl_mins));
    let state = AppState::new(engine, state::build_extractor(), remote).with_sessions(sessions);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Match policy: {}", args.match_policy);
    info!("Session TTL: {} minutes", args.session_ttl_mins);

    // The rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
