// ==========================================
// Funciones auxiliares de tests
// ==========================================
// Responsabilidad: base de datos temporal con esquema y catálogos sembrados
// ==========================================

#![allow(dead_code)]

use manifiesto_bms::db;
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// Crea una base de datos temporal con el esquema y los catálogos de prueba
///
/// # Retorna
/// - NamedTempFile: archivo temporal (debe mantenerse vivo)
/// - String: ruta del archivo
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;
    seed_catalogos(&conn)?;

    Ok((temp_file, db_path))
}

/// Siembra los catálogos de puertos y tipos de contenedor
fn seed_catalogos(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        INSERT INTO puertos (codigo, nombre, pais) VALUES
            ('CLVAP', 'VALPARAISO', 'CL'),
            ('CLSAI', 'SAN ANTONIO', 'CL'),
            ('PABLB', 'BALBOA', 'PA'),
            ('NLRTM', 'ROTTERDAM', 'NL'),
            ('USNYC', 'NEW YORK', 'US');

        INSERT INTO tipo_cnt_map (tipo_bulto, tipo_cnt) VALUES
            ('CT20', '20GP'),
            ('CT40', '40GP'),
            ('CT40H', '40HC');
        "#,
    )?;
    Ok(())
}

/// Inserta un manifiesto mínimo
pub fn insertar_manifiesto(conn: &Connection, id: i64) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO manifiestos (id, nave, viaje, fecha_zarpe, estado)
         VALUES (?1, 'MSC VALPARAISO', '2024-117E', '2024-05-10', 'CREADO')",
        [id],
    )?;
    Ok(())
}
