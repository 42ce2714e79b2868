// ==========================================
// Sistema de Manifiestos - Tipos de dominio
// ==========================================
// Alineado: esquema BMS/SNA v1.0 (Servicio Nacional de Aduanas)
// Serialización: SCREAMING_SNAKE_CASE (igual que la base de datos)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Tipo de servicio
// ==========================================
// FF = carga consolidada / MM = contenedor vacío
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoServicio {
    Ff,
    Mm,
}

impl TipoServicio {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoServicio::Ff => "FF",
            TipoServicio::Mm => "MM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FF" => Some(TipoServicio::Ff),
            "MM" => Some(TipoServicio::Mm),
            _ => None,
        }
    }
}

impl fmt::Display for TipoServicio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Estado de ciclo de vida del BL
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoBl {
    Creado,
    Validado,
    Enviado,
    Anulado,
}

impl EstadoBl {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoBl::Creado => "CREADO",
            EstadoBl::Validado => "VALIDADO",
            EstadoBl::Enviado => "ENVIADO",
            EstadoBl::Anulado => "ANULADO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREADO" => Some(EstadoBl::Creado),
            "VALIDADO" => Some(EstadoBl::Validado),
            "ENVIADO" => Some(EstadoBl::Enviado),
            "ANULADO" => Some(EstadoBl::Anulado),
            _ => None,
        }
    }
}

impl fmt::Display for EstadoBl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Nivel de entidad de un hallazgo de validación
// ==========================================
// El frontend usa el nivel + sec para posicionar el hallazgo
// en la pestaña correspondiente del editor de BL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Nivel {
    Bl,
    Item,
    Contenedor,
    Transbordo,
}

impl Nivel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Nivel::Bl => "BL",
            Nivel::Item => "ITEM",
            Nivel::Contenedor => "CONTENEDOR",
            Nivel::Transbordo => "TRANSBORDO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BL" => Some(Nivel::Bl),
            "ITEM" => Some(Nivel::Item),
            "CONTENEDOR" => Some(Nivel::Contenedor),
            "TRANSBORDO" => Some(Nivel::Transbordo),
            _ => None,
        }
    }
}

impl fmt::Display for Nivel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Severidad de un hallazgo
// ==========================================
// ERROR bloquea la generación XML; OBS es informativa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severidad {
    Error,
    Obs,
}

impl Severidad {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severidad::Error => "ERROR",
            Severidad::Obs => "OBS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ERROR" => Some(Severidad::Error),
            "OBS" => Some(Severidad::Obs),
            _ => None,
        }
    }
}

impl fmt::Display for Severidad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Estado agregado de validación del BL
// ==========================================
// Derivado del snapshot vigente de hallazgos:
// ERROR presente => ERROR; si no, OBS presente => OBS; si no, OK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidStatus {
    Ok,
    Obs,
    Error,
}

impl ValidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidStatus::Ok => "OK",
            ValidStatus::Obs => "OBS",
            ValidStatus::Error => "ERROR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(ValidStatus::Ok),
            "OBS" => Some(ValidStatus::Obs),
            "ERROR" => Some(ValidStatus::Error),
            _ => None,
        }
    }
}

impl fmt::Display for ValidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
