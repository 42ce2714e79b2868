// ==========================================
// Sistema de Manifiestos - Biblioteca principal
// ==========================================
// Stack: Rust + SQLite + axum
// Dominio: manifiestos de exportación marítima, validación de BLs y
// generación de documentos XML BMS/SNA para el sistema aduanero
// ==========================================

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - entidades y tipos
pub mod domain;

// Capa de repositorio - acceso a datos
pub mod repository;

// Capa de motores - reglas de negocio
pub mod engine;

// Generación de documentos XML
pub mod xml;

// Capa API - interfaces de negocio
pub mod api;

// Capa de aplicación - servidor HTTP
pub mod app;

// Configuración
pub mod config;

// Infraestructura de base de datos (conexión/PRAGMA unificados)
pub mod db;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexportación de tipos centrales
// ==========================================

// Tipos de dominio
pub use domain::types::{EstadoBl, Nivel, Severidad, TipoServicio, ValidStatus};

// Entidades de dominio
pub use domain::{
    Bl, BlAggregate, BlParaXml, Catalogo, Contenedor, Discrepancia, EstadoValidacion, Imo, Item,
    Manifiesto, Puerto, ResumenCuadratura, Transbordo, Validacion,
};

// Motores
pub use engine::{ExportacionEngine, ResultadoExportacion, ValidacionEngine};

// Codec
pub use xml::CodecBms;

// API
pub use api::{BlApi, ManifiestoApi};

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const APP_NAME: &str = "Sistema de Manifiestos BMS";

// Versión del documento BMS/SNA emitido
pub const BMS_SCHEMA_VERSION: &str = "1.0";
