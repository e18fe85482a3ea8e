use anyhow::Context;
use tracing::info;

use api::{setup_config, setup_db, setup_router};
use utils::migrate;

/// Loads configuration, migrates the database and serves until the process exits.
pub async fn run() -> anyhow::Result<()> {
    let config = setup_config()?;

    let conn = setup_db(&config.db_url).await?;
    migrate(&conn).await.context("Migration failed")?;

    let server_url = config.get_server_url();
    let router = setup_router(config, conn)?;

    let listener = tokio::net::TcpListener::bind(&server_url)
        .await
        .with_context(|| format!("Failed to bind {server_url}"))?;
    info!("Listening on {}", server_url);

    axum::serve(listener, router)
        .await
        .context("Server stopped unexpectedly")
}
