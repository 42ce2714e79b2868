// ==========================================
// Sistema de Manifiestos - API de manifiestos
// ==========================================
// Responsabilidad: listado de selección de exportación y generación del
// lote de documentos XML de un manifiesto.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::manifiesto::BlParaXml;
use crate::engine::exportacion::{ArchivoExportacion, ExportacionEngine, ResultadoExportacion};
use crate::repository::bl_repo::BlRepository;
use crate::repository::manifiesto_repo::ManifiestoRepository;
use std::sync::Arc;

pub struct ManifiestoApi {
    manifiesto_repo: Arc<ManifiestoRepository>,
    bl_repo: Arc<BlRepository>,
    exportacion_engine: Arc<ExportacionEngine>,
}

impl ManifiestoApi {
    pub fn new(
        manifiesto_repo: Arc<ManifiestoRepository>,
        bl_repo: Arc<BlRepository>,
        exportacion_engine: Arc<ExportacionEngine>,
    ) -> Self {
        Self {
            manifiesto_repo,
            bl_repo,
            exportacion_engine,
        }
    }

    /// BLs del manifiesto anotados con su estado de validación persistido,
    /// para la pantalla de selección de exportación
    pub fn bls_para_xml(&self, manifiesto_id: i64) -> ApiResult<Vec<BlParaXml>> {
        if self.manifiesto_repo.buscar(manifiesto_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "Manifiesto (id={}) no existe",
                manifiesto_id
            )));
        }
        Ok(self.bl_repo.listar_para_xml(manifiesto_id)?)
    }

    /// Genera el archivo zip con los documentos XML del lote seleccionado
    ///
    /// # Retorna
    /// - Ok(ArchivoExportacion): zip completo, una entrada por BL
    /// - Err(ExportacionRechazada): listado de BLs con hallazgos ERROR
    pub fn generar_xmls_multiples(
        &self,
        manifiesto_id: i64,
        bl_numbers: &[String],
    ) -> ApiResult<ArchivoExportacion> {
        match self.exportacion_engine.exportar(manifiesto_id, bl_numbers)? {
            ResultadoExportacion::Archivo(archivo) => Ok(archivo),
            ResultadoExportacion::Rechazado { bls_con_errores } => {
                Err(ApiError::ExportacionRechazada { bls_con_errores })
            }
        }
    }
}
