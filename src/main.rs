use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use top_music_api::config::Config;
use top_music_api::{AppState, build_router, connect_store, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    let songs = connect_store(&config)
        .await
        .context("Failed to open song store")?;

    // Seeding finishes before the listener is bound.
    if config.reset_db {
        let records = seed::bundled_dataset()?;
        seed::reset_database(songs.as_ref(), records)
            .await
            .context("Failed to seed the song collection")?;
    }

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let app = build_router(AppState::new(songs));

    info!("🎧 Server running on http://localhost:{}", config.port);
    info!("📡 Song endpoints: /songs, /songs/id/{{id}}");

    axum::serve(listener, app).await?;
    Ok(())
}
