// ==========================================
// Sistema de Manifiestos - Agregador de estado de validación
// ==========================================
// Reducción pura O(n) sobre los hallazgos; nunca falla.
// ==========================================

use crate::domain::types::{Severidad, ValidStatus};
use crate::domain::validacion::{EstadoValidacion, Validacion};

/// Reduce un conjunto de hallazgos al estado agregado del BL
///
/// ERROR presente => ERROR; si no, OBS presente => OBS; si no, OK.
pub fn agregar(validaciones: &[Validacion]) -> EstadoValidacion {
    let valid_count_error = validaciones
        .iter()
        .filter(|v| v.severidad == Severidad::Error)
        .count() as i64;
    let valid_count_obs = validaciones
        .iter()
        .filter(|v| v.severidad == Severidad::Obs)
        .count() as i64;

    let valid_status = if valid_count_error > 0 {
        ValidStatus::Error
    } else if valid_count_obs > 0 {
        ValidStatus::Obs
    } else {
        ValidStatus::Ok
    };

    EstadoValidacion {
        valid_status,
        valid_count_error,
        valid_count_obs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Nivel;

    #[test]
    fn test_agregar_vacio_es_ok() {
        let estado = agregar(&[]);
        assert_eq!(estado.valid_status, ValidStatus::Ok);
        assert_eq!(estado.valid_count_error, 0);
        assert_eq!(estado.valid_count_obs, 0);
    }

    #[test]
    fn test_error_domina_sobre_obs() {
        let hallazgos = vec![
            Validacion::obs_bl("Puerto Origen", "puerto no registrado"),
            Validacion::error_bl("peso_bruto", "peso bruto requerido"),
            Validacion::error(Nivel::Item, "cantidad", 1, "cantidad debe ser mayor a 0"),
        ];
        let estado = agregar(&hallazgos);
        assert_eq!(estado.valid_status, ValidStatus::Error);
        assert_eq!(estado.valid_count_error, 2);
        assert_eq!(estado.valid_count_obs, 1);
    }

    #[test]
    fn test_solo_obs() {
        let hallazgos = vec![Validacion::obs_bl("Puerto Destino", "puerto no registrado")];
        let estado = agregar(&hallazgos);
        assert_eq!(estado.valid_status, ValidStatus::Obs);
    }
}
