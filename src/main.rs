use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salonspace_api::{app, config::Config, cors, services::metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);
    info!(
        "Defaults: saturday={:?}, conflict policy={:?}",
        config.default_saturday_policy, config.conflict_policy
    );

    metrics::init();

    // Base domain, salon subdomains and localhost.
    let cors = cors::cors_layer(&config.app_base_url);

    let state = AppState { config: config.clone() };
    let router = app(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("salonspace schedule API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
