// ==========================================
// Sistema de Manifiestos - Repositorio de manifiestos
// ==========================================
// Solo lectura para el flujo de exportación; el CRUD de manifiestos
// vive en las pantallas de mantención.
// ==========================================

use crate::domain::manifiesto::Manifiesto;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct ManifiestoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ManifiestoRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn buscar(&self, id: i64) -> RepositoryResult<Option<Manifiesto>> {
        let conn = self.get_conn()?;
        let manifiesto = conn
            .query_row(
                "SELECT id, nave, viaje, fecha_zarpe, estado FROM manifiestos WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Manifiesto {
                        id: row.get(0)?,
                        nave: row.get(1)?,
                        viaje: row.get(2)?,
                        fecha_zarpe: row.get::<_, Option<NaiveDate>>(3)?,
                        estado: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(manifiesto)
    }
}
