// ==========================================
// Sistema de Manifiestos - Capa de repositorio
// ==========================================
// Acceso a datos sobre SQLite; los motores nunca tocan SQL.
// ==========================================

pub mod bl_repo;
pub mod error;
pub mod manifiesto_repo;
pub mod puerto_repo;
pub mod validacion_repo;

pub use bl_repo::BlRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use manifiesto_repo::ManifiestoRepository;
pub use puerto_repo::PuertoRepository;
pub use validacion_repo::ValidacionRepository;
