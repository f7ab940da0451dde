//! LegalEase development host
//!
//! Serves the browser front end (`www/`) and the canned sample documents the
//! "try a sample" buttons fetch. The analysis backend is a separate service
//! the page talks to directly.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_health, handle_sample};

#[derive(Parser, Debug)]
#[command(name = "legalease-server")]
#[command(about = "Development host for the LegalEase front end")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding index.html and the wasm bundle
    #[arg(long, default_value = "apps/legalease-web/www")]
    www_dir: PathBuf,

    /// Directory holding the sample documents
    #[arg(long, default_value = "apps/legalease-web/www/sample-docs")]
    sample_docs_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub sample_docs_dir: PathBuf,
}

pub fn router(state: AppState, www_dir: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/sample-docs/:filename", get(handle_sample))
        .fallback_service(ServeDir::new(www_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState {
        sample_docs_dir: args.sample_docs_dir.clone(),
    };
    let app = router(state, args.www_dir.clone());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Serving {} on http://{}", args.www_dir.display(), addr);
    info!("Sample documents from {}", args.sample_docs_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
