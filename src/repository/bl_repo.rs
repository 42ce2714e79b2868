// ==========================================
// Sistema de Manifiestos - Repositorio de BLs
// ==========================================
// Responsabilidad: materializar el agregado completo del BL (encabezado +
// items + contenedores + transbordos) como única entrada de los motores.
// El tipo_cnt de un contenedor sin valor propio se deriva aquí vía
// tipo_cnt_map a partir del tipo de bulto del item dueño.
// ==========================================

use crate::domain::bl::{Bl, BlAggregate, Contenedor, Imo, Item, Transbordo};
use crate::domain::manifiesto::BlParaXml;
use crate::domain::types::{EstadoBl, TipoServicio};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

pub struct BlRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BlRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// ¿Existe un BL con esta clave de negocio?
    pub fn existe(&self, bl_number: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let existe = conn
            .query_row(
                "SELECT 1 FROM bls WHERE bl_number = ?1",
                params![bl_number],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(existe)
    }

    // ==========================================
    // Carga del agregado
    // ==========================================

    /// Carga el agregado completo de un BL
    ///
    /// # Retorna
    /// - Ok(BlAggregate): agregado materializado, listo para los motores
    /// - Err(NotFound): el bl_number no existe
    pub fn cargar_aggregate(&self, bl_number: &str) -> RepositoryResult<BlAggregate> {
        let conn = self.get_conn()?;

        let bl = Self::cargar_encabezado(&conn, bl_number)?.ok_or_else(|| {
            RepositoryError::NotFound {
                entity: "Bl".to_string(),
                id: bl_number.to_string(),
            }
        })?;

        let items = Self::cargar_items(&conn, bl_number)?;
        let contenedores = Self::cargar_contenedores(&conn, bl_number)?;
        let transbordos = Self::cargar_transbordos(&conn, bl_number)?;

        Ok(BlAggregate {
            bl,
            items,
            contenedores,
            transbordos,
        })
    }

    fn cargar_encabezado(conn: &Connection, bl_number: &str) -> RepositoryResult<Option<Bl>> {
        let bl = conn
            .query_row(
                "SELECT bl_number, manifiesto_id, viaje, tipo_servicio,
                        fecha_emision, fecha_presentacion, fecha_zarpe, fecha_carga,
                        puerto_origen, lugar_recepcion, puerto_embarque, puerto_descarga,
                        puerto_destino, lugar_entrega, lugar_emision,
                        embarcador, embarcador_id, consignatario, consignatario_id,
                        notificante, notificante_id,
                        descripcion_carga, peso_bruto, peso_unidad,
                        volumen, volumen_unidad, total_bultos, estado
                   FROM bls WHERE bl_number = ?1",
                params![bl_number],
                Self::map_encabezado,
            )
            .optional()?;
        Ok(bl)
    }

    fn map_encabezado(row: &Row<'_>) -> rusqlite::Result<Bl> {
        let tipo_servicio: Option<String> = row.get(3)?;
        let estado: String = row.get(27)?;
        Ok(Bl {
            bl_number: row.get(0)?,
            manifiesto_id: row.get(1)?,
            viaje: row.get(2)?,
            // un valor no reconocido se reporta como campo faltante por el motor
            tipo_servicio: tipo_servicio.as_deref().and_then(TipoServicio::parse),
            fecha_emision: row.get::<_, Option<NaiveDate>>(4)?,
            fecha_presentacion: row.get::<_, Option<NaiveDate>>(5)?,
            fecha_zarpe: row.get::<_, Option<NaiveDate>>(6)?,
            fecha_carga: row.get::<_, Option<NaiveDate>>(7)?,
            puerto_origen: row.get(8)?,
            lugar_recepcion: row.get(9)?,
            puerto_embarque: row.get(10)?,
            puerto_descarga: row.get(11)?,
            puerto_destino: row.get(12)?,
            lugar_entrega: row.get(13)?,
            lugar_emision: row.get(14)?,
            embarcador: row.get(15)?,
            embarcador_id: row.get(16)?,
            consignatario: row.get(17)?,
            consignatario_id: row.get(18)?,
            notificante: row.get(19)?,
            notificante_id: row.get(20)?,
            descripcion_carga: row.get(21)?,
            peso_bruto: row.get(22)?,
            peso_unidad: row.get(23)?,
            volumen: row.get(24)?,
            volumen_unidad: row.get(25)?,
            total_bultos: row.get(26)?,
            estado: EstadoBl::parse(&estado).unwrap_or(EstadoBl::Creado),
        })
    }

    fn cargar_items(conn: &Connection, bl_number: &str) -> RepositoryResult<Vec<Item>> {
        let mut stmt = conn.prepare(
            "SELECT numero_item, descripcion, marcas, tipo_bulto, cantidad,
                    peso, peso_unidad, volumen, volumen_unidad, carga_peligrosa
               FROM bl_items WHERE bl_number = ?1 ORDER BY numero_item",
        )?;
        let mut items: Vec<Item> = stmt
            .query_map(params![bl_number], |row| {
                let peligrosa: String = row.get(9)?;
                Ok(Item {
                    numero_item: row.get(0)?,
                    descripcion: row.get(1)?,
                    marcas: row.get(2)?,
                    tipo_bulto: row.get(3)?,
                    cantidad: row.get(4)?,
                    peso: row.get(5)?,
                    peso_unidad: row.get(6)?,
                    volumen: row.get(7)?,
                    volumen_unidad: row.get(8)?,
                    carga_peligrosa: peligrosa == "S",
                    contenedores: Vec::new(),
                })
            })?
            .collect::<Result<_, _>>()?;

        let mut stmt_asoc = conn.prepare(
            "SELECT contenedor_sec FROM bl_item_contenedor
              WHERE bl_number = ?1 AND numero_item = ?2 ORDER BY contenedor_sec",
        )?;
        for item in &mut items {
            item.contenedores = stmt_asoc
                .query_map(params![bl_number, item.numero_item], |row| row.get(0))?
                .collect::<Result<_, _>>()?;
        }
        Ok(items)
    }

    fn cargar_contenedores(
        conn: &Connection,
        bl_number: &str,
    ) -> RepositoryResult<Vec<Contenedor>> {
        // tipo_cnt derivado: si la fila no lo trae, se toma del mapeo del
        // tipo de bulto del primer item asociado
        let mut stmt = conn.prepare(
            "SELECT c.sec, c.codigo,
                    COALESCE(c.tipo_cnt, (
                        SELECT m.tipo_cnt
                          FROM bl_item_contenedor ic
                          JOIN bl_items i
                            ON i.bl_number = ic.bl_number AND i.numero_item = ic.numero_item
                          JOIN tipo_cnt_map m ON m.tipo_bulto = i.tipo_bulto
                         WHERE ic.bl_number = c.bl_number AND ic.contenedor_sec = c.sec
                         ORDER BY ic.numero_item LIMIT 1
                    )) AS tipo_cnt,
                    c.peso, c.peso_unidad, c.volumen, c.volumen_unidad
               FROM bl_contenedores c
              WHERE c.bl_number = ?1 ORDER BY c.sec",
        )?;
        let mut contenedores: Vec<Contenedor> = stmt
            .query_map(params![bl_number], |row| {
                Ok(Contenedor {
                    sec: row.get(0)?,
                    codigo: row.get(1)?,
                    tipo_cnt: row.get(2)?,
                    peso: row.get(3)?,
                    peso_unidad: row.get(4)?,
                    volumen: row.get(5)?,
                    volumen_unidad: row.get(6)?,
                    sellos: Vec::new(),
                    imos: Vec::new(),
                })
            })?
            .collect::<Result<_, _>>()?;

        let mut stmt_sellos = conn.prepare(
            "SELECT sello FROM bl_sellos
              WHERE bl_number = ?1 AND contenedor_sec = ?2 ORDER BY sello",
        )?;
        let mut stmt_imos = conn.prepare(
            "SELECT clase, numero FROM bl_imos
              WHERE bl_number = ?1 AND contenedor_sec = ?2 ORDER BY clase, numero",
        )?;
        for contenedor in &mut contenedores {
            contenedor.sellos = stmt_sellos
                .query_map(params![bl_number, contenedor.sec], |row| row.get(0))?
                .collect::<Result<_, _>>()?;
            contenedor.imos = stmt_imos
                .query_map(params![bl_number, contenedor.sec], |row| {
                    Ok(Imo {
                        clase: row.get(0)?,
                        numero: row.get(1)?,
                    })
                })?
                .collect::<Result<_, _>>()?;
        }
        Ok(contenedores)
    }

    fn cargar_transbordos(
        conn: &Connection,
        bl_number: &str,
    ) -> RepositoryResult<Vec<Transbordo>> {
        let mut stmt = conn.prepare(
            "SELECT t.sec, t.puerto_id, p.nombre
               FROM bl_transbordos t
               LEFT JOIN puertos p ON p.codigo = t.puerto_id
              WHERE t.bl_number = ?1 ORDER BY t.sec",
        )?;
        let transbordos = stmt
            .query_map(params![bl_number], |row| {
                Ok(Transbordo {
                    sec: row.get(0)?,
                    puerto_id: row.get(1)?,
                    puerto_nombre: row.get(2)?,
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(transbordos)
    }

    // ==========================================
    // Estado de validación persistido
    // ==========================================

    /// Listado de BLs de un manifiesto para la pantalla de exportación,
    /// anotado con el estado de validación persistido
    pub fn listar_para_xml(&self, manifiesto_id: i64) -> RepositoryResult<Vec<BlParaXml>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT bl_number, viaje, estado, valid_status, valid_count_error, valid_count_obs
               FROM bls WHERE manifiesto_id = ?1 ORDER BY bl_number",
        )?;
        let filas = stmt
            .query_map(params![manifiesto_id], |row| {
                Ok(BlParaXml {
                    bl_number: row.get(0)?,
                    viaje: row.get(1)?,
                    estado: row.get(2)?,
                    valid_status: row.get(3)?,
                    valid_count_error: row.get(4)?,
                    valid_count_obs: row.get(5)?,
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(filas)
    }

}
