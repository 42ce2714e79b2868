// ==========================================
// Sistema de Manifiestos - Repositorio de hallazgos de validación
// ==========================================
// Responsabilidad: snapshot vigente de hallazgos por BL.
// El snapshot se reemplaza completo (nunca se anexa) y el estado agregado
// del BL se actualiza en la misma transacción para que listado y detalle
// no puedan divergir.
// ==========================================

use crate::domain::types::{Nivel, Severidad};
use crate::domain::validacion::{EstadoValidacion, Validacion};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct ValidacionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ValidacionRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Snapshot vigente de hallazgos de un BL, en orden de reporte
    pub fn listar(&self, bl_number: &str) -> RepositoryResult<Vec<Validacion>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT nivel, campo, sec, severidad, mensaje
               FROM bl_validaciones WHERE bl_number = ?1 ORDER BY orden",
        )?;
        let validaciones = stmt
            .query_map(params![bl_number], |row| {
                let nivel: String = row.get(0)?;
                let severidad: String = row.get(3)?;
                Ok(Validacion {
                    nivel: Nivel::parse(&nivel).unwrap_or(Nivel::Bl),
                    campo: row.get(1)?,
                    sec: row.get(2)?,
                    severidad: Severidad::parse(&severidad).unwrap_or(Severidad::Error),
                    mensaje: row.get(4)?,
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(validaciones)
    }

    /// Reemplaza el snapshot de hallazgos y el estado agregado del BL
    ///
    /// # Parámetros
    /// - bl_number: BL validado
    /// - validaciones: hallazgos recién computados (reemplazo total)
    /// - estado: reducción ya agregada de esos hallazgos
    pub fn reemplazar_snapshot(
        &self,
        bl_number: &str,
        validaciones: &[Validacion],
        estado: &EstadoValidacion,
    ) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "DELETE FROM bl_validaciones WHERE bl_number = ?1",
            params![bl_number],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO bl_validaciones (bl_number, orden, nivel, campo, sec, severidad, mensaje)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (orden, v) in validaciones.iter().enumerate() {
                stmt.execute(params![
                    bl_number,
                    orden as i64,
                    v.nivel.as_str(),
                    v.campo,
                    v.sec,
                    v.severidad.as_str(),
                    v.mensaje,
                ])?;
            }
        }

        let cambiadas = tx.execute(
            "UPDATE bls
                SET valid_status = ?2, valid_count_error = ?3, valid_count_obs = ?4,
                    updated_at = ?5
              WHERE bl_number = ?1",
            params![
                bl_number,
                estado.valid_status.as_str(),
                estado.valid_count_error,
                estado.valid_count_obs,
                Utc::now().to_rfc3339(),
            ],
        )?;
        if cambiadas == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Bl".to_string(),
                id: bl_number.to_string(),
            });
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }
}
