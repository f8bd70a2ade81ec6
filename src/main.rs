//! Rate Engine HTTP server.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rate_engine::api::{AppState, create_router};
use rate_engine::config::{ConfigLoader, ServerSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rate_engine=info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;
    let config = ConfigLoader::load(&settings.config_dir)?;
    info!(
        hotel = %config.hotel().code,
        windows = config.rate_windows().len(),
        config_dir = %settings.config_dir,
        "Configuration loaded"
    );

    let state = AppState::with_session_ttl(config, settings.session_ttl)?;
    let router = create_router(state);

    let listener = TcpListener::bind(settings.addr).await?;
    info!(addr = %settings.addr, "Rate engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
