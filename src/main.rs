// ==========================================
// Sistema de Manifiestos - Entrada principal
// ==========================================
// Stack: Rust + SQLite + axum
// ==========================================

use std::sync::Arc;

use manifiesto_bms::app::{http, AppState};
use manifiesto_bms::config::AppConfig;
use manifiesto_bms::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", manifiesto_bms::APP_NAME);
    tracing::info!("versión: {}", manifiesto_bms::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::load();
    tracing::info!("base de datos: {}", config.db_path);

    let state = AppState::new(config.db_path.clone())
        .map_err(|e| anyhow::anyhow!("no se pudo inicializar AppState: {}", e))?;

    http::run(&config, Arc::new(state)).await
}
