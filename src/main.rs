mod config;
mod state;
mod websocket;
mod routes;
mod handlers;
mod session;
mod speech;
mod translate;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use config::Config;
use state::AppState;

const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "speech_translate_backend=debug,tower_http=debug".to_string()),
        )
        .init();

    // .env is honored for local development; the key never lives in the
    // config file or the binary.
    let _ = dotenvy::dotenv();

    // Load configuration - $CONFIG_PATH, then conf.yaml, then defaults
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = None;
    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                info!("Loaded configuration from: {}", path);
                config = Some(cfg);
                break;
            }
            Err(e) => {
                tracing::debug!("Failed to load config from {}: {}", path, e);
                continue;
            }
        }
    }
    let config = config.unwrap_or_else(|| {
        info!("No config file found, using defaults");
        Config::default()
    });

    let api_key = std::env::var(API_KEY_ENV)
        .with_context(|| format!("{} must be set", API_KEY_ENV))?;

    // Initialize app state
    let app_state = AppState::new(config.clone(), api_key)?;

    // Build application
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server
    let host: std::net::IpAddr = config
        .system_config
        .host
        .parse()
        .with_context(|| format!("invalid host '{}'", config.system_config.host))?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
