// ==========================================
// Sistema de Manifiestos - Hallazgos de validación
// ==========================================
// Ciclo de vida: el snapshot persistido por BL se reemplaza completo en
// cada recomputación (carga del BL, revalidar explícito, gate de exportación).
// ==========================================

use crate::domain::types::{Nivel, Severidad, ValidStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// Validacion - Hallazgo individual
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validacion {
    /// Entidad a la que pertenece el hallazgo
    pub nivel: Nivel,
    /// Campo o slot observado (p.ej. "peso_bruto", "Puerto Embarque")
    pub campo: String,
    /// Secuencia de la entidad (numero_item / sec), NULL a nivel BL
    pub sec: Option<i64>,
    pub severidad: Severidad,
    pub mensaje: String,
}

impl Validacion {
    pub fn error_bl(campo: &str, mensaje: &str) -> Self {
        Self {
            nivel: Nivel::Bl,
            campo: campo.to_string(),
            sec: None,
            severidad: Severidad::Error,
            mensaje: mensaje.to_string(),
        }
    }

    pub fn obs_bl(campo: &str, mensaje: &str) -> Self {
        Self {
            nivel: Nivel::Bl,
            campo: campo.to_string(),
            sec: None,
            severidad: Severidad::Obs,
            mensaje: mensaje.to_string(),
        }
    }

    pub fn error(nivel: Nivel, campo: &str, sec: i64, mensaje: &str) -> Self {
        Self {
            nivel,
            campo: campo.to_string(),
            sec: Some(sec),
            severidad: Severidad::Error,
            mensaje: mensaje.to_string(),
        }
    }
}

// ==========================================
// EstadoValidacion - Reducción del snapshot
// ==========================================
// Persistido junto al BL para que el listado de exportación no tenga
// que recomputar reglas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstadoValidacion {
    pub valid_status: ValidStatus,
    pub valid_count_error: i64,
    pub valid_count_obs: i64,
}

// ==========================================
// Cuadratura item/contenedor
// ==========================================
// Discrepancia viva del flujo de edición: se recalcula siempre,
// nunca se persiste como hallazgo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancia {
    pub numero_item: i64,
    /// Cantidad declarada en el item
    pub cantidad: i64,
    /// Contenedores actualmente asociados
    pub asociados: i64,
    /// cantidad - asociados (negativo = sobran asociaciones)
    pub faltan: i64,
}

/// Resultado del chequeo de cuadratura de un BL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenCuadratura {
    pub cuadrado: bool,
    pub discrepancias: Vec<Discrepancia>,
}
