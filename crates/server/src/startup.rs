use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};
use service::fechas::{FechaRepository, FechaStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application over the store at `cfg.storage.data_file`.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store: Arc<dyn FechaRepository> = FechaStore::new(cfg.storage.data_file.clone());
    routes::build_router(AppState { fechas: store }, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_data_dir(&cfg.storage.data_file).await?;

    let app = build_app(&cfg);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, data_file = %cfg.storage.data_file.display(), "starting fechas server");
    axum::serve(listener, app).await?;
    Ok(())
}
