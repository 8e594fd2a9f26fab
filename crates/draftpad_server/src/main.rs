//! Headless API server entrypoint.

use draftpad_core::config::env_flag_enabled;
use draftpad_server::{resolve_bind_address, AppState, Config, ContentRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftpad=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any origin");
    }

    let state = AppState::new(config, ContentRegistry::seeded());
    let bind_addr = resolve_bind_address(&state.config, allow_public);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("API listening on http://{}", listener.local_addr()?);

    draftpad_server::serve_router(listener, state, allow_public, shutdown_signal()).await?;
    Ok(())
}
