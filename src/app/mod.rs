// ==========================================
// Sistema de Manifiestos - Capa de aplicación
// ==========================================
// Integración HTTP: estado compartido, handlers y servidor axum.
// ==========================================

pub mod handlers;
pub mod http;
pub mod state;

pub use state::AppState;
