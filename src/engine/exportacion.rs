// ==========================================
// Sistema de Manifiestos - Orquestador de exportación por lote
// ==========================================
// Responsabilidad: validar TODOS los BLs solicitados, aplicar el gate de
// ERROR todo-o-nada y empaquetar los documentos XML en un único archivo zip.
//
// El gate se decide recién con todos los resultados reunidos: abortar al
// primer fallo dejaría una lectura parcial de qué BLs fallan. Con cualquier
// ERROR presente no se produce ningún documento; las OBS nunca bloquean.
// ==========================================

use crate::domain::bl::BlAggregate;
use crate::domain::catalogo::Catalogo;
use crate::domain::types::{EstadoBl, Severidad, ValidStatus};
use crate::domain::validacion::Validacion;
use crate::engine::estado;
use crate::engine::validacion::ValidacionEngine;
use crate::repository::bl_repo::BlRepository;
use crate::repository::error::RepositoryError;
use crate::repository::manifiesto_repo::ManifiestoRepository;
use crate::repository::puerto_repo::PuertoRepository;
use crate::repository::validacion_repo::ValidacionRepository;
use crate::xml::codec::{CodecBms, CodecError};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

// ==========================================
// Tipos de resultado
// ==========================================

/// BL rechazado por el gate, con sus hallazgos ERROR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlConErrores {
    pub bl_number: String,
    pub errors: Vec<Validacion>,
}

/// Archivo zip generado por el lote
#[derive(Debug, Clone)]
pub struct ArchivoExportacion {
    pub nombre_archivo: String,
    pub bytes: Vec<u8>,
    pub total_bls: usize,
}

/// Salida del orquestador: archivo completo o rechazo estructurado
#[derive(Debug, Clone)]
pub enum ResultadoExportacion {
    Archivo(ArchivoExportacion),
    Rechazado { bls_con_errores: Vec<BlConErrores> },
}

/// Errores del flujo de exportación (distintos de los rechazos de validación)
#[derive(Error, Debug)]
pub enum ExportacionError {
    #[error("manifiesto {0} no encontrado")]
    ManifiestoNoEncontrado(i64),

    #[error("BL {0} no encontrado")]
    BlNoEncontrado(String),

    #[error("BL {0} está anulado y no puede exportarse")]
    BlAnulado(String),

    #[error("la solicitud no incluye BLs")]
    SolicitudVacia,

    #[error(transparent)]
    Repositorio(#[from] RepositoryError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("error armando el archivo zip: {0}")]
    Archivo(#[from] zip::result::ZipError),

    #[error("error de E/S armando el archivo: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportacionResult<T> = Result<T, ExportacionError>;

// ==========================================
// ExportacionEngine
// ==========================================

pub struct ExportacionEngine {
    manifiesto_repo: Arc<ManifiestoRepository>,
    bl_repo: Arc<BlRepository>,
    puerto_repo: Arc<PuertoRepository>,
    validacion_repo: Arc<ValidacionRepository>,
    validacion_engine: Arc<ValidacionEngine>,
    codec: Arc<CodecBms>,
}

impl ExportacionEngine {
    pub fn new(
        manifiesto_repo: Arc<ManifiestoRepository>,
        bl_repo: Arc<BlRepository>,
        puerto_repo: Arc<PuertoRepository>,
        validacion_repo: Arc<ValidacionRepository>,
        validacion_engine: Arc<ValidacionEngine>,
        codec: Arc<CodecBms>,
    ) -> Self {
        Self {
            manifiesto_repo,
            bl_repo,
            puerto_repo,
            validacion_repo,
            validacion_engine,
            codec,
        }
    }

    /// Exporta un lote de BLs de un manifiesto
    ///
    /// # Parámetros
    /// - manifiesto_id: manifiesto dueño de los BLs
    /// - bl_numbers: BLs seleccionados en la pantalla de exportación
    ///
    /// # Retorna
    /// - Archivo: zip con una entrada `<bl_number>.xml` por BL
    /// - Rechazado: listado completo de BLs con ERROR; sin archivo parcial
    pub fn exportar(
        &self,
        manifiesto_id: i64,
        bl_numbers: &[String],
    ) -> ExportacionResult<ResultadoExportacion> {
        let lote_id = Uuid::new_v4();

        self.manifiesto_repo
            .buscar(manifiesto_id)?
            .ok_or(ExportacionError::ManifiestoNoEncontrado(manifiesto_id))?;

        // Entradas deterministas: orden por clave de negocio, sin duplicados
        let mut seleccion: Vec<String> = bl_numbers.to_vec();
        seleccion.sort();
        seleccion.dedup();
        if seleccion.is_empty() {
            return Err(ExportacionError::SolicitudVacia);
        }

        tracing::info!(
            lote = %lote_id,
            manifiesto_id,
            bls = seleccion.len(),
            "inicio de exportación de lote"
        );

        // Fase 1: validar todos los BLs antes de decidir el gate
        let mut validados: Vec<(BlAggregate, Catalogo)> = Vec::new();
        let mut bls_con_errores: Vec<BlConErrores> = Vec::new();

        for bl_number in &seleccion {
            let agg = match self.bl_repo.cargar_aggregate(bl_number) {
                Ok(agg) => agg,
                Err(RepositoryError::NotFound { .. }) => {
                    return Err(ExportacionError::BlNoEncontrado(bl_number.clone()))
                }
                Err(e) => return Err(e.into()),
            };
            if agg.bl.estado == EstadoBl::Anulado {
                return Err(ExportacionError::BlAnulado(bl_number.clone()));
            }

            let catalogo = self.puerto_repo.resolver(&agg.codigos_puerto())?;
            let hallazgos = self.validacion_engine.validar(&agg, &catalogo);
            let estado_validacion = estado::agregar(&hallazgos);

            // el gate de exportación también refresca el snapshot persistido
            self.validacion_repo
                .reemplazar_snapshot(bl_number, &hallazgos, &estado_validacion)?;

            if estado_validacion.valid_status == ValidStatus::Error {
                bls_con_errores.push(BlConErrores {
                    bl_number: bl_number.clone(),
                    errors: hallazgos
                        .into_iter()
                        .filter(|v| v.severidad == Severidad::Error)
                        .collect(),
                });
            } else {
                validados.push((agg, catalogo));
            }
        }

        // Gate todo-o-nada
        if !bls_con_errores.is_empty() {
            tracing::warn!(
                lote = %lote_id,
                manifiesto_id,
                rechazados = bls_con_errores.len(),
                "lote rechazado por hallazgos ERROR"
            );
            return Ok(ResultadoExportacion::Rechazado { bls_con_errores });
        }

        // Fase 2: codificar y empaquetar
        let mut documentos = Vec::with_capacity(validados.len());
        for (agg, catalogo) in &validados {
            let bytes = self.codec.codificar(agg, catalogo)?;
            documentos.push((agg.bl.bl_number.clone(), bytes));
        }

        let bytes = empaquetar(&documentos)?;
        let nombre_archivo = format!("BLs_Manifiesto_{}.zip", manifiesto_id);

        tracing::info!(
            lote = %lote_id,
            manifiesto_id,
            archivo = %nombre_archivo,
            total_bls = documentos.len(),
            "lote exportado"
        );

        Ok(ResultadoExportacion::Archivo(ArchivoExportacion {
            nombre_archivo,
            total_bls: documentos.len(),
            bytes,
        }))
    }
}

/// Empaqueta los documentos en un zip con una entrada por BL
///
/// Timestamp fijo en las entradas: el contenido del archivo depende solo
/// de los documentos.
fn empaquetar(documentos: &[(String, Vec<u8>)]) -> ExportacionResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opciones = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for (bl_number, bytes) in documentos {
        zip.start_file(format!("{}.xml", bl_number), opciones)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}
