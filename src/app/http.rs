// ==========================================
// Sistema de Manifiestos - Servidor HTTP
// ==========================================
// Router axum sobre el AppState compartido; CORS abierto para el
// frontend de desarrollo y trazas por request.
// ==========================================

use crate::app::handlers;
use crate::app::state::AppState;
use crate::config::AppConfig;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Construye el router con todas las rutas del servicio
pub fn build_router(ctx: Arc<AppState>) -> Router {
    Router::new()
        // Validación de BLs
        .route(
            "/bls/:bl_number/validaciones",
            get(handlers::get_validaciones),
        )
        .route(
            "/api/bls/:bl_number/revalidar",
            post(handlers::post_revalidar),
        )
        .route(
            "/api/bls/:bl_number/cuadratura",
            get(handlers::get_cuadratura),
        )
        // Generación XML
        .route(
            "/api/bls/:bl_number/generar-xml",
            post(handlers::post_generar_xml),
        )
        .route(
            "/api/manifiestos/:id/bls-para-xml",
            get(handlers::get_bls_para_xml),
        )
        .route(
            "/api/manifiestos/:id/generar-xmls-multiples",
            post(handlers::post_generar_xmls_multiples),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Levanta el servidor HTTP y atiende hasta que el proceso termine
pub async fn run(config: &AppConfig, ctx: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(ctx);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!("servidor HTTP escuchando en {}", config.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
