// ==========================================
// Sistema de Manifiestos - Manifiesto de viaje
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Agrupación de BLs por recalada de una nave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifiesto {
    pub id: i64,
    pub nave: Option<String>,
    pub viaje: Option<String>,
    pub fecha_zarpe: Option<NaiveDate>,
    pub estado: Option<String>,
}

/// Fila del listado de selección de exportación (bls-para-xml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlParaXml {
    pub bl_number: String,
    pub viaje: Option<String>,
    pub estado: String,
    pub valid_status: Option<String>,
    pub valid_count_error: i64,
    pub valid_count_obs: i64,
}
