// ==========================================
// Sistema de Manifiestos - Catálogos de referencia
// ==========================================
// Los catálogos son de solo lectura para los motores: se resuelven una vez
// por solicitud en la capa de repositorio y se inyectan ya materializados.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Puerto registrado en el catálogo (UN/LOCODE)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puerto {
    pub codigo: String,
    pub nombre: String,
    pub pais: Option<String>,
}

// ==========================================
// Catalogo - Vista resuelta por solicitud
// ==========================================
// Contiene solo los puertos referenciados por el agregado en curso.
// Un código ausente significa "no registrado", nunca "falló la consulta":
// los errores de infraestructura se cortan antes, al construir la vista.
#[derive(Debug, Clone, Default)]
pub struct Catalogo {
    puertos: HashMap<String, Puerto>,
}

impl Catalogo {
    pub fn new(puertos: HashMap<String, Puerto>) -> Self {
        Self { puertos }
    }

    /// Puerto registrado para el código dado, si existe
    pub fn puerto(&self, codigo: &str) -> Option<&Puerto> {
        self.puertos.get(codigo)
    }

    /// Nombre resuelto del puerto (comodidad para el codec XML)
    pub fn nombre_puerto(&self, codigo: &str) -> Option<&str> {
        self.puertos.get(codigo).map(|p| p.nombre.as_str())
    }
}
