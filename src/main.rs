use std::sync::Arc;

mod config;
mod download;
mod extract;
mod fetch;
mod models;
mod routes;
#[cfg(test)]
mod testing;

use config::Config;
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env();
    let client = fetch::build_client(&config)?;
    let bind_addr = config.bind_addr.clone();

    let app = create_router(AppState {
        config: Arc::new(config),
        client,
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
