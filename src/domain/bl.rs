// ==========================================
// Sistema de Manifiestos - Modelo de dominio del BL
// ==========================================
// Alineado: esquema BMS/SNA v1.0 - secciones ENCABEZADO/RUTA/ITEMS/CONTENEDORES
// Uso: el agregado es la única entrada del motor de validación y del codec XML;
//      lo arma la capa de repositorio, los motores no tocan la base de datos.
// ==========================================

use crate::domain::types::{EstadoBl, TipoServicio};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Bl - Encabezado del Bill of Lading
// ==========================================
// Los campos de datos son opcionales a propósito: un BL recién creado
// puede estar incompleto y es el motor de validación quien lo reporta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bl {
    // ===== Identidad =====
    pub bl_number: String,            // Clave de negocio, única e inmutable
    pub manifiesto_id: i64,           // Manifiesto al que pertenece
    pub viaje: Option<String>,        // Referencia de viaje de la nave

    // ===== Servicio y fechas =====
    pub tipo_servicio: Option<TipoServicio>, // FF | MM
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_presentacion: Option<NaiveDate>,
    pub fecha_zarpe: Option<NaiveDate>,
    pub fecha_carga: Option<NaiveDate>,

    // ===== Puertos y lugares (códigos UN/LOCODE) =====
    pub puerto_origen: Option<String>,
    pub lugar_recepcion: Option<String>,
    pub puerto_embarque: Option<String>,
    pub puerto_descarga: Option<String>,
    pub puerto_destino: Option<String>,
    pub lugar_entrega: Option<String>,
    pub lugar_emision: Option<String>,

    // ===== Participantes (snapshot de texto + FK opcional) =====
    pub embarcador: Option<String>,
    pub embarcador_id: Option<i64>,
    pub consignatario: Option<String>,
    pub consignatario_id: Option<i64>,
    pub notificante: Option<String>,
    pub notificante_id: Option<i64>,

    // ===== Totales de carga =====
    pub descripcion_carga: Option<String>,
    pub peso_bruto: Option<f64>,      // 3 decimales en el documento
    pub peso_unidad: Option<String>,  // KGM / TNE
    pub volumen: Option<f64>,
    pub volumen_unidad: Option<String>, // MTQ
    pub total_bultos: Option<i64>,

    // ===== Ciclo de vida =====
    pub estado: EstadoBl,
}

// ==========================================
// Item - Línea de carga del BL (1..N)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub numero_item: i64,             // Secuencia estable, no posicional
    pub descripcion: Option<String>,  // No exigida por validación
    pub marcas: Option<String>,
    pub tipo_bulto: Option<String>,   // Código de tipo de bulto
    pub cantidad: Option<i64>,        // Debe cuadrar con contenedores asociados
    pub peso: Option<f64>,
    pub peso_unidad: Option<String>,
    pub volumen: Option<f64>,
    pub volumen_unidad: Option<String>,
    pub carga_peligrosa: bool,        // 'S'/'N' en la base
    pub contenedores: Vec<i64>,       // sec de los contenedores asociados
}

// ==========================================
// Contenedor (0..N por BL)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contenedor {
    pub sec: i64,                     // Secuencia estable dentro del BL
    pub codigo: String,               // 4 letras + 7 dígitos
    pub tipo_cnt: Option<String>,     // Derivado de tipo_cnt_map, no editable
    pub peso: Option<f64>,
    pub peso_unidad: Option<String>,
    pub volumen: Option<f64>,
    pub volumen_unidad: Option<String>,
    pub sellos: Vec<String>,          // Únicos dentro del contenedor, <=35 chars
    pub imos: Vec<Imo>,
}

/// Entrada IMO de mercancía peligrosa (clase + número)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imo {
    pub clase: String,
    pub numero: String,
}

// ==========================================
// Transbordo - Escala intermedia de la ruta (0..N)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transbordo {
    pub sec: i64,                        // Orden del tramo en la ruta
    pub puerto_id: String,               // Código de puerto
    pub puerto_nombre: Option<String>,   // NULL si el código no está en catálogo
}

// ==========================================
// BlAggregate - Agregado completo del BL
// ==========================================
// Unidad de trabajo de los motores: encabezado + items + contenedores +
// transbordos, materializado en una sola carga de repositorio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlAggregate {
    pub bl: Bl,
    pub items: Vec<Item>,
    pub contenedores: Vec<Contenedor>,
    pub transbordos: Vec<Transbordo>,
}

impl BlAggregate {
    /// Códigos de puerto/lugar referenciados por el agregado
    /// (encabezado + transbordos), para resolver el catálogo una
    /// sola vez por solicitud.
    pub fn codigos_puerto(&self) -> Vec<String> {
        let mut codigos: Vec<String> = [
            &self.bl.puerto_origen,
            &self.bl.lugar_recepcion,
            &self.bl.puerto_embarque,
            &self.bl.puerto_descarga,
            &self.bl.puerto_destino,
            &self.bl.lugar_entrega,
            &self.bl.lugar_emision,
        ]
        .iter()
        .filter_map(|c| c.as_ref())
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.to_string())
        .collect();

        codigos.extend(self.transbordos.iter().map(|t| t.puerto_id.clone()));
        codigos.sort();
        codigos.dedup();
        codigos
    }

    /// Contenedores vinculados (vía cualquier item) a carga peligrosa
    pub fn secs_con_carga_peligrosa(&self) -> Vec<i64> {
        let mut secs: Vec<i64> = self
            .items
            .iter()
            .filter(|i| i.carga_peligrosa)
            .flat_map(|i| i.contenedores.iter().copied())
            .collect();
        secs.sort();
        secs.dedup();
        secs
    }
}
