use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info, warn};

use storefront_api::{create_router, AppState};
use storefront_infrastructure::{build_session_store, StorefrontApiClient};
use storefront_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = storefront_shared::telemetry::init_telemetry(&config.telemetry)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    if config.storefront.storefront_token.is_empty() {
        warn!("storefront.storefront_token is empty; Storefront API calls will be rejected");
    }

    let client = StorefrontApiClient::from_settings(&config.storefront)?;
    info!("Storefront API endpoint: {}", client.endpoint());

    let sessions = match build_session_store(&config.session) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialise session store: {}", e);
            std::process::exit(1);
        }
    };

    let cors = cors_layer(&config.app.allowed_origins);
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(config, Arc::new(client), sessions);
    let app = create_router(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        );

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins).allow_credentials(true)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
