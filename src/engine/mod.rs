// ==========================================
// Sistema de Manifiestos - Capa de motores
// ==========================================
// Reglas de negocio puras sobre el agregado del BL; los motores no arman
// SQL y todo hallazgo lleva mensaje explícito.
// ==========================================

pub mod cuadratura;
pub mod estado;
pub mod exportacion;
pub mod validacion;

pub use exportacion::{
    ArchivoExportacion, BlConErrores, ExportacionEngine, ExportacionError, ResultadoExportacion,
};
pub use validacion::ValidacionEngine;
