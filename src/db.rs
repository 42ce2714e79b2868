// ==========================================
// Sistema de Manifiestos - Infraestructura SQLite
// ==========================================
// Objetivo:
// - Unificar PRAGMA en todas las Connection::open, evitando que unos módulos
//   abran con foreign_keys y otros no
// - busy_timeout único para reducir errores busy con escrituras concurrentes
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout por defecto (milisegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura los PRAGMA unificados de una conexión SQLite
///
/// foreign_keys y busy_timeout se configuran por conexión, no por base.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre una conexión SQLite con la configuración unificada
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Crea las tablas propias del sistema si no existen
///
/// Los catálogos (puertos, tipo_cnt_map, participantes) los mantienen las
/// pantallas CRUD; aquí solo se garantiza su existencia para el arranque
/// y las pruebas.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS manifiestos (
            id INTEGER PRIMARY KEY,
            nave TEXT,
            viaje TEXT,
            fecha_zarpe TEXT,
            estado TEXT NOT NULL DEFAULT 'CREADO'
        );

        CREATE TABLE IF NOT EXISTS puertos (
            codigo TEXT PRIMARY KEY,
            nombre TEXT NOT NULL,
            pais TEXT
        );

        CREATE TABLE IF NOT EXISTS tipo_cnt_map (
            tipo_bulto TEXT PRIMARY KEY,
            tipo_cnt TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS participantes (
            id INTEGER PRIMARY KEY,
            nombre TEXT NOT NULL,
            direccion TEXT,
            pais TEXT
        );

        CREATE TABLE IF NOT EXISTS bls (
            bl_number TEXT PRIMARY KEY,
            manifiesto_id INTEGER NOT NULL REFERENCES manifiestos(id),
            viaje TEXT,
            tipo_servicio TEXT,
            fecha_emision TEXT,
            fecha_presentacion TEXT,
            fecha_zarpe TEXT,
            fecha_carga TEXT,
            puerto_origen TEXT,
            lugar_recepcion TEXT,
            puerto_embarque TEXT,
            puerto_descarga TEXT,
            puerto_destino TEXT,
            lugar_entrega TEXT,
            lugar_emision TEXT,
            embarcador TEXT,
            embarcador_id INTEGER REFERENCES participantes(id),
            consignatario TEXT,
            consignatario_id INTEGER REFERENCES participantes(id),
            notificante TEXT,
            notificante_id INTEGER REFERENCES participantes(id),
            descripcion_carga TEXT,
            peso_bruto REAL,
            peso_unidad TEXT,
            volumen REAL,
            volumen_unidad TEXT,
            total_bultos INTEGER,
            estado TEXT NOT NULL DEFAULT 'CREADO',
            valid_status TEXT,
            valid_count_error INTEGER NOT NULL DEFAULT 0,
            valid_count_obs INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_bls_manifiesto ON bls(manifiesto_id);

        CREATE TABLE IF NOT EXISTS bl_items (
            bl_number TEXT NOT NULL REFERENCES bls(bl_number) ON DELETE CASCADE,
            numero_item INTEGER NOT NULL,
            descripcion TEXT,
            marcas TEXT,
            tipo_bulto TEXT,
            cantidad INTEGER,
            peso REAL,
            peso_unidad TEXT,
            volumen REAL,
            volumen_unidad TEXT,
            carga_peligrosa TEXT NOT NULL DEFAULT 'N',
            PRIMARY KEY (bl_number, numero_item)
        );

        CREATE TABLE IF NOT EXISTS bl_contenedores (
            bl_number TEXT NOT NULL REFERENCES bls(bl_number) ON DELETE CASCADE,
            sec INTEGER NOT NULL,
            codigo TEXT NOT NULL,
            tipo_cnt TEXT,
            peso REAL,
            peso_unidad TEXT,
            volumen REAL,
            volumen_unidad TEXT,
            PRIMARY KEY (bl_number, sec)
        );

        CREATE TABLE IF NOT EXISTS bl_item_contenedor (
            bl_number TEXT NOT NULL,
            numero_item INTEGER NOT NULL,
            contenedor_sec INTEGER NOT NULL,
            PRIMARY KEY (bl_number, numero_item, contenedor_sec),
            FOREIGN KEY (bl_number, numero_item)
                REFERENCES bl_items(bl_number, numero_item) ON DELETE CASCADE,
            FOREIGN KEY (bl_number, contenedor_sec)
                REFERENCES bl_contenedores(bl_number, sec) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS bl_sellos (
            bl_number TEXT NOT NULL,
            contenedor_sec INTEGER NOT NULL,
            sello TEXT NOT NULL CHECK (length(sello) <= 35),
            PRIMARY KEY (bl_number, contenedor_sec, sello),
            FOREIGN KEY (bl_number, contenedor_sec)
                REFERENCES bl_contenedores(bl_number, sec) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS bl_imos (
            bl_number TEXT NOT NULL,
            contenedor_sec INTEGER NOT NULL,
            clase TEXT NOT NULL,
            numero TEXT NOT NULL,
            FOREIGN KEY (bl_number, contenedor_sec)
                REFERENCES bl_contenedores(bl_number, sec) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS bl_transbordos (
            bl_number TEXT NOT NULL REFERENCES bls(bl_number) ON DELETE CASCADE,
            sec INTEGER NOT NULL,
            puerto_id TEXT NOT NULL,
            PRIMARY KEY (bl_number, sec)
        );

        CREATE TABLE IF NOT EXISTS bl_validaciones (
            bl_number TEXT NOT NULL REFERENCES bls(bl_number) ON DELETE CASCADE,
            orden INTEGER NOT NULL,
            nivel TEXT NOT NULL,
            campo TEXT NOT NULL,
            sec INTEGER,
            severidad TEXT NOT NULL,
            mensaje TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_validaciones_bl ON bl_validaciones(bl_number);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotente() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='bls'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
