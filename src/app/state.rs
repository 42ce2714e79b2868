// ==========================================
// Sistema de Manifiestos - Estado de aplicación
// ==========================================
// Responsabilidad: armar repositorios, motores y APIs sobre una conexión
// compartida, como estado global de la capa HTTP.
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{BlApi, ManifiestoApi};
use crate::db;
use crate::engine::exportacion::ExportacionEngine;
use crate::engine::validacion::ValidacionEngine;
use crate::repository::{
    BlRepository, ManifiestoRepository, PuertoRepository, ValidacionRepository,
};
use crate::xml::codec::CodecBms;

/// Estado de aplicación compartido por todos los handlers HTTP
pub struct AppState {
    pub db_path: String,
    pub bl_api: Arc<BlApi>,
    pub manifiesto_api: Arc<ManifiestoApi>,
}

impl AppState {
    /// Crea el estado de aplicación
    ///
    /// # Parámetros
    /// - db_path: ruta del archivo SQLite
    ///
    /// # Pasos
    /// 1. Abre la conexión con PRAGMA unificados y garantiza el esquema
    /// 2. Inicializa repositorios y motores
    /// 3. Crea las APIs
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("inicializando AppState, base de datos: {}", db_path);

        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("no se pudo abrir la base de datos: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("no se pudo crear el esquema: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        Self::from_connection(db_path, conn)
    }

    /// Variante para tests y herramientas que ya traen una conexión
    pub fn from_connection(
        db_path: String,
        conn: Arc<Mutex<Connection>>,
    ) -> Result<Self, String> {
        // ==========================================
        // Capa de repositorio
        // ==========================================
        let bl_repo = Arc::new(BlRepository::from_connection(conn.clone()));
        let puerto_repo = Arc::new(PuertoRepository::from_connection(conn.clone()));
        let validacion_repo = Arc::new(ValidacionRepository::from_connection(conn.clone()));
        let manifiesto_repo = Arc::new(ManifiestoRepository::from_connection(conn));

        // ==========================================
        // Capa de motores
        // ==========================================
        let validacion_engine = Arc::new(ValidacionEngine::new());
        let codec = Arc::new(CodecBms::new());
        let exportacion_engine = Arc::new(ExportacionEngine::new(
            manifiesto_repo.clone(),
            bl_repo.clone(),
            puerto_repo.clone(),
            validacion_repo.clone(),
            validacion_engine.clone(),
            codec.clone(),
        ));

        // ==========================================
        // Capa API
        // ==========================================
        let bl_api = Arc::new(BlApi::new(
            bl_repo.clone(),
            puerto_repo,
            validacion_repo,
            validacion_engine,
            codec,
        ));
        let manifiesto_api = Arc::new(ManifiestoApi::new(
            manifiesto_repo,
            bl_repo,
            exportacion_engine,
        ));

        tracing::info!("AppState inicializado");

        Ok(Self {
            db_path,
            bl_api,
            manifiesto_api,
        })
    }
}
