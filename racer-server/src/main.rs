//! Arcade Racer Server
//!
//! Game host with the race loop, live race stream and REST API

use anyhow::Result;
use clap::Parser;
use racer_server::{api, config::ServerConfig, game_loop, state};
use racer_stores::StoreSet;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting Arcade Racer Server");

    // Create application state
    let mut seed = config.load_seed()?;
    let saved_race = seed.race.take();
    let stores = StoreSet::in_memory(seed, config.latency());
    let state = state::AppState::new(stores, config.race_host());

    if let Some(race) = saved_race {
        game_loop::resume_race(&state, race).await;
    }

    // Build the router
    let app = api::create_router(state);

    // Start server
    info!("Server listening on http://{}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
