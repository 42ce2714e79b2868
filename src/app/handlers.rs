// ==========================================
// Sistema de Manifiestos - Handlers HTTP
// ==========================================
// Endpoints REST consumidos por el frontend de manifiestos.
// ==========================================

use crate::api::error::ApiError;
use crate::api::RevalidacionResponse;
use crate::app::state::AppState;
use crate::domain::manifiesto::BlParaXml;
use crate::domain::validacion::{ResumenCuadratura, Validacion};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

// ==========================================
// Tipos de request
// ==========================================

#[derive(Debug, Deserialize)]
pub struct GenerarXmlsRequest {
    #[serde(rename = "blNumbers")]
    pub bl_numbers: Vec<String>,
}

// ==========================================
// Endpoints de BL
// ==========================================

/// GET /bls/:bl_number/validaciones
pub async fn get_validaciones(
    State(ctx): State<Arc<AppState>>,
    Path(bl_number): Path<String>,
) -> Result<Json<Vec<Validacion>>, ApiError> {
    let validaciones = ctx.bl_api.listar_validaciones(&bl_number)?;
    Ok(Json(validaciones))
}

/// POST /api/bls/:bl_number/revalidar
pub async fn post_revalidar(
    State(ctx): State<Arc<AppState>>,
    Path(bl_number): Path<String>,
) -> Result<Json<RevalidacionResponse>, ApiError> {
    let respuesta = ctx.bl_api.revalidar(&bl_number)?;
    Ok(Json(respuesta))
}

/// POST /api/bls/:bl_number/generar-xml
///
/// Vista previa: devuelve el documento tal como saldría en el lote.
pub async fn post_generar_xml(
    State(ctx): State<Arc<AppState>>,
    Path(bl_number): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = ctx.bl_api.generar_xml(&bl_number)?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/xml; charset=ISO-8859-1"),
        )],
        bytes,
    )
        .into_response())
}

/// GET /api/bls/:bl_number/cuadratura
pub async fn get_cuadratura(
    State(ctx): State<Arc<AppState>>,
    Path(bl_number): Path<String>,
) -> Result<Json<ResumenCuadratura>, ApiError> {
    let resumen = ctx.bl_api.verificar_cuadratura(&bl_number)?;
    Ok(Json(resumen))
}

// ==========================================
// Endpoints de manifiesto
// ==========================================

/// GET /api/manifiestos/:id/bls-para-xml
pub async fn get_bls_para_xml(
    State(ctx): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<BlParaXml>>, ApiError> {
    let filas = ctx.manifiesto_api.bls_para_xml(id)?;
    Ok(Json(filas))
}

/// POST /api/manifiestos/:id/generar-xmls-multiples
pub async fn post_generar_xmls_multiples(
    State(ctx): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<GenerarXmlsRequest>,
) -> Result<Response, ApiError> {
    let archivo = ctx
        .manifiesto_api
        .generar_xmls_multiples(id, &req.bl_numbers)?;

    let disposicion = format!("attachment; filename=\"{}\"", archivo.nombre_archivo);
    let disposicion = HeaderValue::from_str(&disposicion)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/zip"),
            ),
            (header::CONTENT_DISPOSITION, disposicion),
        ],
        archivo.bytes,
    )
        .into_response())
}

// ==========================================
// Mapeo de ApiError a respuesta HTTP
// ==========================================
// Los rechazos de validación devuelven su estructura completa; los errores
// de infraestructura jamás se disfrazan de rechazo (ni al revés).
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ValidacionBloqueante { bl_number, errores } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "bl_number": bl_number,
                    "errors": errores,
                })),
            )
                .into_response(),
            ApiError::ExportacionRechazada { bls_con_errores } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "bls_con_errores": bls_con_errores,
                })),
            )
                .into_response(),
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": msg })))
                    .into_response()
            }
            ApiError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": msg })))
                    .into_response()
            }
            ApiError::BusinessRuleViolation(msg) => {
                (StatusCode::CONFLICT, Json(serde_json::json!({ "error": msg })))
                    .into_response()
            }
            otro => {
                tracing::error!("error interno en handler: {}", otro);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": otro.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
