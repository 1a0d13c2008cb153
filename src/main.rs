use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use reco_api::{
    api::{create_router, AppState},
    config::Config,
    services::{Catalog, KnnModel},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Both inputs are read once here; a missing or corrupt file is fatal.
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("loading catalog from {}", config.catalog_path))?;
    let model = KnnModel::load(&config.model_path)
        .with_context(|| format!("loading model artifact from {}", config.model_path))?;

    tracing::info!(
        catalog_entries = catalog.len(),
        model_vocabulary = model.len(),
        recommendations = config.recommendations,
        "startup data loaded"
    );

    let state = AppState::new(catalog, Arc::new(model), config.recommendations);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;
    tracing::info!("listening on http://{}:{}", config.host, config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
