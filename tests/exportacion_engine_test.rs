// ==========================================
// Sistema de Manifiestos - Tests de exportación por lote
// ==========================================
// Flujo completo contra base temporal: gate todo-o-nada y archivo zip.
// ==========================================

mod helpers;
mod test_helpers;

use helpers::test_data_builder::BlBuilder;
use manifiesto_bms::db;
use manifiesto_bms::engine::exportacion::{
    ExportacionEngine, ExportacionError, ResultadoExportacion,
};
use manifiesto_bms::engine::ValidacionEngine;
use manifiesto_bms::repository::{
    BlRepository, ManifiestoRepository, PuertoRepository, ValidacionRepository,
};
use manifiesto_bms::xml::CodecBms;
use rusqlite::Connection;
use std::io::Read;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

fn armar_engine(db_path: &str) -> (ExportacionEngine, Arc<Mutex<Connection>>) {
    let conn = Arc::new(Mutex::new(
        db::open_sqlite_connection(db_path).expect("no se pudo abrir la base de prueba"),
    ));
    let engine = ExportacionEngine::new(
        Arc::new(ManifiestoRepository::from_connection(conn.clone())),
        Arc::new(BlRepository::from_connection(conn.clone())),
        Arc::new(PuertoRepository::from_connection(conn.clone())),
        Arc::new(ValidacionRepository::from_connection(conn.clone())),
        Arc::new(ValidacionEngine::new()),
        Arc::new(CodecBms::new()),
    );
    (engine, conn)
}

fn setup() -> (NamedTempFile, ExportacionEngine, Arc<Mutex<Connection>>) {
    let (temp_file, db_path) = test_helpers::create_test_db().expect("base de prueba");
    let (engine, conn) = armar_engine(&db_path);
    {
        let c = conn.lock().unwrap();
        test_helpers::insertar_manifiesto(&c, 1).expect("manifiesto");
    }
    (temp_file, engine, conn)
}

#[test]
fn test_lote_valido_genera_zip_con_una_entrada_por_bl() {
    let (_tmp, engine, conn) = setup();
    {
        let c = conn.lock().unwrap();
        BlBuilder::completo("SCL500494400", 1)
            .item(1, 1)
            .contenedor(1, "MSCU1234567")
            .asociar(1, 1)
            .sello(1, "SEAL0001")
            .insertar(&c)
            .unwrap();
        BlBuilder::completo("SCL500494401", 1)
            .item(1, 1)
            .contenedor(1, "HLXU7654321")
            .asociar(1, 1)
            .insertar(&c)
            .unwrap();
    }

    let resultado = engine
        .exportar(1, &["SCL500494401".to_string(), "SCL500494400".to_string()])
        .unwrap();

    let archivo = match resultado {
        ResultadoExportacion::Archivo(a) => a,
        ResultadoExportacion::Rechazado { bls_con_errores } => {
            panic!("lote rechazado: {:?}", bls_con_errores)
        }
    };
    assert_eq!(archivo.nombre_archivo, "BLs_Manifiesto_1.zip");
    assert_eq!(archivo.total_bls, 2);

    // el zip trae una entrada por BL, nombrada por clave de negocio
    let cursor = std::io::Cursor::new(archivo.bytes);
    let mut zip = zip::ZipArchive::new(cursor).unwrap();
    assert_eq!(zip.len(), 2);
    let nombres: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        nombres,
        vec!["SCL500494400.xml".to_string(), "SCL500494401.xml".to_string()]
    );

    let mut contenido = String::new();
    zip.by_name("SCL500494400.xml")
        .unwrap()
        .read_to_string(&mut contenido)
        .unwrap();
    assert!(contenido.starts_with("<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>"));
    assert!(contenido.contains("<NRO_BL>SCL500494400</NRO_BL>"));
}

#[test]
fn test_gate_todo_o_nada() {
    let (_tmp, engine, conn) = setup();
    {
        let c = conn.lock().unwrap();
        // A válido, B sin peso bruto (ERROR)
        BlBuilder::completo("SCL500494400", 1).insertar(&c).unwrap();
        BlBuilder::completo("SCL500494401", 1)
            .sin_peso_bruto()
            .insertar(&c)
            .unwrap();
    }

    let resultado = engine
        .exportar(1, &["SCL500494400".to_string(), "SCL500494401".to_string()])
        .unwrap();

    match resultado {
        ResultadoExportacion::Rechazado { bls_con_errores } => {
            // solo el BL con ERROR aparece en el rechazo, y no hay archivo
            assert_eq!(bls_con_errores.len(), 1);
            assert_eq!(bls_con_errores[0].bl_number, "SCL500494401");
            assert!(!bls_con_errores[0].errors.is_empty());
            assert!(bls_con_errores[0]
                .errors
                .iter()
                .any(|v| v.campo == "peso_bruto"));
        }
        ResultadoExportacion::Archivo(_) => panic!("el gate debió rechazar el lote completo"),
    }

    // el gate también refresca el estado persistido de ambos BLs
    let c = conn.lock().unwrap();
    let status_a: String = c
        .query_row(
            "SELECT valid_status FROM bls WHERE bl_number = 'SCL500494400'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let status_b: String = c
        .query_row(
            "SELECT valid_status FROM bls WHERE bl_number = 'SCL500494401'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(status_a, "OK");
    assert_eq!(status_b, "ERROR");
}

#[test]
fn test_obs_no_bloquea_la_exportacion() {
    let (_tmp, engine, conn) = setup();
    {
        let c = conn.lock().unwrap();
        // puerto de destino fuera de catálogo: OBS, no ERROR
        BlBuilder::completo("SCL500494400", 1)
            .puerto_destino("XXYYY")
            .insertar(&c)
            .unwrap();
    }

    let resultado = engine.exportar(1, &["SCL500494400".to_string()]).unwrap();
    assert!(matches!(resultado, ResultadoExportacion::Archivo(_)));
}

#[test]
fn test_bl_anulado_rechaza_con_error_estructurado() {
    let (_tmp, engine, conn) = setup();
    {
        let c = conn.lock().unwrap();
        BlBuilder::completo("SCL500494400", 1)
            .estado("ANULADO")
            .insertar(&c)
            .unwrap();
    }

    let err = engine
        .exportar(1, &["SCL500494400".to_string()])
        .unwrap_err();
    assert!(matches!(err, ExportacionError::BlAnulado(_)));
}

#[test]
fn test_manifiesto_inexistente() {
    let (_tmp, engine, _conn) = setup();
    let err = engine
        .exportar(99, &["SCL500494400".to_string()])
        .unwrap_err();
    assert!(matches!(err, ExportacionError::ManifiestoNoEncontrado(99)));
}

#[test]
fn test_bl_inexistente() {
    let (_tmp, engine, _conn) = setup();
    let err = engine.exportar(1, &["NOEXISTE".to_string()]).unwrap_err();
    assert!(matches!(err, ExportacionError::BlNoEncontrado(_)));
}

#[test]
fn test_solicitud_vacia() {
    let (_tmp, engine, _conn) = setup();
    let err = engine.exportar(1, &[]).unwrap_err();
    assert!(matches!(err, ExportacionError::SolicitudVacia));
}
