// ==========================================
// Sistema de Manifiestos - API de BLs
// ==========================================
// Responsabilidad: casos de uso de validación y vista previa XML de un BL.
// Solo revalidar reemplaza el snapshot persistido (el gate de exportación
// lo hace por su lado); la vista previa valida en memoria y no escribe nada.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::bl::BlAggregate;
use crate::domain::catalogo::Catalogo;
use crate::domain::types::{EstadoBl, Severidad, ValidStatus};
use crate::domain::validacion::{EstadoValidacion, ResumenCuadratura, Validacion};
use crate::engine::cuadratura;
use crate::engine::estado;
use crate::engine::validacion::ValidacionEngine;
use crate::repository::bl_repo::BlRepository;
use crate::repository::puerto_repo::PuertoRepository;
use crate::repository::validacion_repo::ValidacionRepository;
use crate::xml::codec::CodecBms;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Respuesta de revalidación de un BL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevalidacionResponse {
    pub bl_number: String,
    pub valid_status: ValidStatus,
    pub valid_count_error: i64,
    pub valid_count_obs: i64,
}

pub struct BlApi {
    bl_repo: Arc<BlRepository>,
    puerto_repo: Arc<PuertoRepository>,
    validacion_repo: Arc<ValidacionRepository>,
    validacion_engine: Arc<ValidacionEngine>,
    codec: Arc<CodecBms>,
}

impl BlApi {
    pub fn new(
        bl_repo: Arc<BlRepository>,
        puerto_repo: Arc<PuertoRepository>,
        validacion_repo: Arc<ValidacionRepository>,
        validacion_engine: Arc<ValidacionEngine>,
        codec: Arc<CodecBms>,
    ) -> Self {
        Self {
            bl_repo,
            puerto_repo,
            validacion_repo,
            validacion_engine,
            codec,
        }
    }

    /// Snapshot vigente de hallazgos de un BL
    pub fn listar_validaciones(&self, bl_number: &str) -> ApiResult<Vec<Validacion>> {
        if !self.bl_repo.existe(bl_number)? {
            return Err(ApiError::NotFound(format!("Bl (id={}) no existe", bl_number)));
        }
        Ok(self.validacion_repo.listar(bl_number)?)
    }

    /// Recomputa y persiste los hallazgos y el estado agregado de un BL
    pub fn revalidar(&self, bl_number: &str) -> ApiResult<RevalidacionResponse> {
        let (_, _, hallazgos, estado_validacion) = self.validar_en_memoria(bl_number)?;
        self.validacion_repo
            .reemplazar_snapshot(bl_number, &hallazgos, &estado_validacion)?;
        tracing::info!(
            bl_number,
            valid_status = %estado_validacion.valid_status,
            errores = estado_validacion.valid_count_error,
            obs = estado_validacion.valid_count_obs,
            "BL revalidado"
        );
        Ok(RevalidacionResponse {
            bl_number: bl_number.to_string(),
            valid_status: estado_validacion.valid_status,
            valid_count_error: estado_validacion.valid_count_error,
            valid_count_obs: estado_validacion.valid_count_obs,
        })
    }

    /// Vista previa del documento XML BMS/SNA de un BL
    ///
    /// # Retorna
    /// - Ok(bytes): documento ISO-8859-1, sin efectos: el snapshot
    ///   persistido solo lo reescriben revalidar y el gate de exportación
    /// - Err(ValidacionBloqueante): el BL tiene hallazgos ERROR
    pub fn generar_xml(&self, bl_number: &str) -> ApiResult<Vec<u8>> {
        let (agg, catalogo, hallazgos, estado_validacion) =
            self.validar_en_memoria(bl_number)?;

        if agg.bl.estado == EstadoBl::Anulado {
            return Err(ApiError::BusinessRuleViolation(format!(
                "BL {} está anulado",
                bl_number
            )));
        }

        if estado_validacion.valid_status == ValidStatus::Error {
            return Err(ApiError::ValidacionBloqueante {
                bl_number: bl_number.to_string(),
                errores: hallazgos
                    .into_iter()
                    .filter(|v| v.severidad == Severidad::Error)
                    .collect(),
            });
        }

        let bytes = self
            .codec
            .codificar(&agg, &catalogo)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        Ok(bytes)
    }

    /// Cuadratura viva item/contenedor (bloquea el avance del asistente,
    /// no genera hallazgos persistidos)
    pub fn verificar_cuadratura(&self, bl_number: &str) -> ApiResult<ResumenCuadratura> {
        let agg = self.bl_repo.cargar_aggregate(bl_number)?;
        Ok(cuadratura::verificar(&agg))
    }

    /// Carga el agregado y computa hallazgos y estado en memoria,
    /// sin tocar el snapshot persistido
    fn validar_en_memoria(
        &self,
        bl_number: &str,
    ) -> ApiResult<(BlAggregate, Catalogo, Vec<Validacion>, EstadoValidacion)> {
        let agg = self.bl_repo.cargar_aggregate(bl_number)?;
        let catalogo = self.puerto_repo.resolver(&agg.codigos_puerto())?;
        let hallazgos = self.validacion_engine.validar(&agg, &catalogo);
        let estado_validacion = estado::agregar(&hallazgos);
        Ok((agg, catalogo, hallazgos, estado_validacion))
    }
}
