use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

use price_gateway::config::{load_config, SourceKind};
use price_gateway::sources::PriceSource;
use price_gateway::{handlers, MetalsDevClient, MockSource, PriceGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting Price Gateway...");

    let config = load_config()?;

    let source: Arc<dyn PriceSource> = match config.source {
        SourceKind::Live => {
            info!("✓ metals.dev source selected");
            Arc::new(MetalsDevClient::new(config.api_key.clone()))
        }
        SourceKind::Mock => {
            info!("✓ Mock source selected");
            Arc::new(MockSource)
        }
    };

    let gateway = Arc::new(PriceGateway::new(source));

    // Browser callers hit this from another origin; the layer also answers
    // OPTIONS preflight with the same headers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    // Build router
    let app = Router::new()
        .route("/metal-prices", post(handlers::fetch_metal_prices))
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(gateway);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("🚀 Price Gateway listening on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
