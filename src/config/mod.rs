// ==========================================
// Sistema de Manifiestos - Configuración
// ==========================================
// Resolución de ruta de base de datos y dirección HTTP, con override por
// variable de entorno para debug/tests/CI.
// ==========================================

use std::path::PathBuf;

/// Dirección HTTP por defecto
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3001";

/// Configuración de la aplicación
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub http_addr: String,
}

impl AppConfig {
    /// Carga la configuración desde el entorno
    ///
    /// # Variables de entorno
    /// - MANIFIESTO_BMS_DB_PATH: ruta del archivo SQLite
    /// - MANIFIESTO_BMS_HTTP_ADDR: dirección de escucha (host:puerto)
    pub fn load() -> Self {
        let db_path = std::env::var("MANIFIESTO_BMS_DB_PATH")
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(get_default_db_path);

        let http_addr = std::env::var("MANIFIESTO_BMS_HTTP_ADDR")
            .ok()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());

        Self { db_path, http_addr }
    }
}

/// Ruta por defecto de la base de datos
///
/// Usa el directorio de datos del usuario; si no está disponible cae al
/// directorio de trabajo.
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./manifiesto_bms.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("manifiesto-bms");
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("manifiesto_bms.db");
    }

    path.to_string_lossy().to_string()
}
