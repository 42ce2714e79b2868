// ==========================================
// Sistema de Manifiestos - Errores de la capa API
// ==========================================
// Responsabilidad: convertir errores técnicos de capas inferiores en
// errores de negocio con causa explícita. Los rechazos de validación
// viajan como datos estructurados, nunca como excepción genérica:
// el llamador no debe confundir "el BL tiene errores" con "falló la consulta".
// ==========================================

use crate::domain::validacion::Validacion;
use crate::engine::exportacion::{BlConErrores, ExportacionError};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errores de la capa API
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Rechazos de validación (estructurados)
    // ==========================================
    /// El BL tiene hallazgos ERROR y no puede generar XML
    #[error("el BL {bl_number} tiene {} hallazgos ERROR", errores.len())]
    ValidacionBloqueante {
        bl_number: String,
        errores: Vec<Validacion>,
    },

    /// El lote contiene BLs con hallazgos ERROR; no se produce archivo
    #[error("{} BLs con hallazgos ERROR en el lote", bls_con_errores.len())]
    ExportacionRechazada { bls_con_errores: Vec<BlConErrores> },

    // ==========================================
    // Errores de reglas de negocio
    // ==========================================
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    #[error("recurso no encontrado: {0}")]
    NotFound(String),

    #[error("violación de regla de negocio: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // Errores de acceso a datos
    // ==========================================
    #[error("error de base de datos: {0}")]
    DatabaseError(String),

    #[error("fallo de conexión a la base de datos: {0}")]
    DatabaseConnectionError(String),

    #[error("fallo de transacción: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // Errores genéricos
    // ==========================================
    #[error("error interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// Conversión desde RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={}) no existe", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("lock de base de datos: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("restricción única: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("clave foránea: {}", msg))
            }
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("campo {}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// Conversión desde ExportacionError
// ==========================================
impl From<ExportacionError> for ApiError {
    fn from(err: ExportacionError) -> Self {
        match err {
            ExportacionError::ManifiestoNoEncontrado(id) => {
                ApiError::NotFound(format!("Manifiesto (id={}) no existe", id))
            }
            ExportacionError::BlNoEncontrado(bl) => {
                ApiError::NotFound(format!("Bl (id={}) no existe", bl))
            }
            ExportacionError::BlAnulado(bl) => {
                ApiError::BusinessRuleViolation(format!("BL {} está anulado", bl))
            }
            ExportacionError::SolicitudVacia => {
                ApiError::InvalidInput("la solicitud no incluye BLs".to_string())
            }
            ExportacionError::Repositorio(e) => e.into(),
            ExportacionError::Codec(e) => ApiError::InternalError(e.to_string()),
            ExportacionError::Archivo(e) => ApiError::InternalError(e.to_string()),
            ExportacionError::Io(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

/// Alias de Result para la capa
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_not_found() {
        let repo_err = RepositoryError::NotFound {
            entity: "Bl".to_string(),
            id: "SCL500494400".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Bl"));
                assert!(msg.contains("SCL500494400"));
            }
            _ => panic!("se esperaba NotFound"),
        }
    }

    #[test]
    fn test_conversion_exportacion_anulado() {
        let err: ApiError = ExportacionError::BlAnulado("SUD123".to_string()).into();
        match err {
            ApiError::BusinessRuleViolation(msg) => assert!(msg.contains("anulado")),
            _ => panic!("se esperaba BusinessRuleViolation"),
        }
    }
}
