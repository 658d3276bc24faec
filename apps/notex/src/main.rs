use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notex::compile::CompileClient;
use notex::config::Config;
use notex::routes::build_router;
use notex::state::AppState;
use notex::typeset::{TectonicEngine, TypesetEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting notex v{}", env!("CARGO_PKG_VERSION"));

    // Typesetting engine for /compile-pdf
    let engine = TectonicEngine::new(&config.tectonic_bin);
    if engine.is_available().await {
        info!("Tectonic available ({})", config.tectonic_bin);
    } else {
        warn!(
            "Tectonic not available at '{}'; /compile-pdf will fail until it is installed",
            config.tectonic_bin
        );
    }

    // Outbound bridge for the editor's export endpoint
    let compiler = CompileClient::new(config.compiler())
        .context("failed to build the compilation service client")?;
    info!("Compile client targets {}", compiler.base_url());

    let state = AppState {
        engine: Arc::new(engine),
        compiler,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allows the configured editor origins. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
