use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reelrank_api::{
    config::Config,
    models::RatingStore,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = RatingStore::from_path(&config.ratings_path)?;
    tracing::info!(
        path = %config.ratings_path,
        users = store.len(),
        "Ratings dataset loaded"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { store, config });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
