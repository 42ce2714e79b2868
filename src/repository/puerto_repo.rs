// ==========================================
// Sistema de Manifiestos - Repositorio de puertos
// ==========================================
// Responsabilidad: consultas de solo lectura sobre el catálogo de puertos
// y construcción de la vista Catalogo resuelta por solicitud.
// El CRUD del catálogo pertenece a las pantallas de mantención, no a este módulo.
// ==========================================

use crate::domain::catalogo::{Catalogo, Puerto};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct PuertoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PuertoRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Resuelve el catálogo para un conjunto de códigos
    ///
    /// # Parámetros
    /// - codigos: códigos referenciados por el agregado en curso
    ///
    /// # Retorna
    /// - Catalogo con los puertos registrados; un código sin fila
    ///   simplemente no aparece en la vista (eso es "no registrado")
    pub fn resolver(&self, codigos: &[String]) -> RepositoryResult<Catalogo> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT codigo, nombre, pais FROM puertos WHERE codigo = ?1")?;

        let mut puertos = HashMap::new();
        for codigo in codigos {
            let fila = stmt
                .query_row(params![codigo], |row| {
                    Ok(Puerto {
                        codigo: row.get(0)?,
                        nombre: row.get(1)?,
                        pais: row.get(2)?,
                    })
                })
                .optional()?;
            if let Some(puerto) = fila {
                puertos.insert(puerto.codigo.clone(), puerto);
            }
        }
        Ok(Catalogo::new(puertos))
    }
}
