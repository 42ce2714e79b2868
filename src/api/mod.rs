// ==========================================
// Sistema de Manifiestos - Capa API
// ==========================================
// Interfaces de negocio consumidas por la capa HTTP.
// ==========================================

pub mod bl_api;
pub mod error;
pub mod manifiesto_api;

pub use bl_api::{BlApi, RevalidacionResponse};
pub use error::{ApiError, ApiResult};
pub use manifiesto_api::ManifiestoApi;
