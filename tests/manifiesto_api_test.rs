// ==========================================
// Sistema de Manifiestos - Tests de la API de manifiestos
// ==========================================

mod helpers;
mod test_helpers;

use helpers::test_data_builder::BlBuilder;
use manifiesto_bms::api::error::ApiError;
use manifiesto_bms::api::{BlApi, ManifiestoApi};
use manifiesto_bms::db;
use manifiesto_bms::engine::exportacion::ExportacionEngine;
use manifiesto_bms::engine::ValidacionEngine;
use manifiesto_bms::repository::{
    BlRepository, ManifiestoRepository, PuertoRepository, ValidacionRepository,
};
use manifiesto_bms::xml::CodecBms;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

fn setup() -> (NamedTempFile, ManifiestoApi, BlApi, Arc<Mutex<Connection>>) {
    let (temp_file, db_path) = test_helpers::create_test_db().expect("base de prueba");
    let conn = Arc::new(Mutex::new(
        db::open_sqlite_connection(&db_path).expect("no se pudo abrir la base de prueba"),
    ));

    let bl_repo = Arc::new(BlRepository::from_connection(conn.clone()));
    let puerto_repo = Arc::new(PuertoRepository::from_connection(conn.clone()));
    let validacion_repo = Arc::new(ValidacionRepository::from_connection(conn.clone()));
    let manifiesto_repo = Arc::new(ManifiestoRepository::from_connection(conn.clone()));
    let validacion_engine = Arc::new(ValidacionEngine::new());
    let codec = Arc::new(CodecBms::new());

    let exportacion_engine = Arc::new(ExportacionEngine::new(
        manifiesto_repo.clone(),
        bl_repo.clone(),
        puerto_repo.clone(),
        validacion_repo.clone(),
        validacion_engine.clone(),
        codec.clone(),
    ));
    let manifiesto_api = ManifiestoApi::new(
        manifiesto_repo,
        bl_repo.clone(),
        exportacion_engine,
    );
    let bl_api = BlApi::new(
        bl_repo,
        puerto_repo,
        validacion_repo,
        validacion_engine,
        codec,
    );

    {
        let c = conn.lock().unwrap();
        test_helpers::insertar_manifiesto(&c, 1).expect("manifiesto");
    }
    (temp_file, manifiesto_api, bl_api, conn)
}

#[test]
fn test_bls_para_xml_anota_estado_persistido() {
    let (_tmp, manifiesto_api, bl_api, conn) = setup();
    {
        let c = conn.lock().unwrap();
        BlBuilder::completo("SCL500494400", 1).insertar(&c).unwrap();
        BlBuilder::completo("SCL500494401", 1)
            .sin_peso_bruto()
            .insertar(&c)
            .unwrap();
    }

    // antes de revalidar no hay estado persistido
    let filas = manifiesto_api.bls_para_xml(1).unwrap();
    assert_eq!(filas.len(), 2);
    assert!(filas.iter().all(|f| f.valid_status.is_none()));

    bl_api.revalidar("SCL500494400").unwrap();
    bl_api.revalidar("SCL500494401").unwrap();

    let filas = manifiesto_api.bls_para_xml(1).unwrap();
    let fila_a = filas.iter().find(|f| f.bl_number == "SCL500494400").unwrap();
    let fila_b = filas.iter().find(|f| f.bl_number == "SCL500494401").unwrap();
    assert_eq!(fila_a.valid_status.as_deref(), Some("OK"));
    assert_eq!(fila_a.valid_count_error, 0);
    assert_eq!(fila_b.valid_status.as_deref(), Some("ERROR"));
    assert!(fila_b.valid_count_error > 0);
}

#[test]
fn test_bls_para_xml_manifiesto_inexistente() {
    let (_tmp, manifiesto_api, _bl_api, _conn) = setup();
    let err = manifiesto_api.bls_para_xml(99).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_generar_xmls_multiples_entrega_archivo() {
    let (_tmp, manifiesto_api, _bl_api, conn) = setup();
    {
        let c = conn.lock().unwrap();
        BlBuilder::completo("SCL500494400", 1).insertar(&c).unwrap();
    }

    let archivo = manifiesto_api
        .generar_xmls_multiples(1, &["SCL500494400".to_string()])
        .unwrap();
    assert_eq!(archivo.nombre_archivo, "BLs_Manifiesto_1.zip");
    assert_eq!(archivo.total_bls, 1);
    assert!(!archivo.bytes.is_empty());
}

#[test]
fn test_generar_xmls_multiples_rechazo_estructurado() {
    let (_tmp, manifiesto_api, _bl_api, conn) = setup();
    {
        let c = conn.lock().unwrap();
        BlBuilder::completo("SCL500494400", 1).insertar(&c).unwrap();
        BlBuilder::completo("SCL500494401", 1)
            .sin_embarcador()
            .insertar(&c)
            .unwrap();
    }

    let err = manifiesto_api
        .generar_xmls_multiples(
            1,
            &["SCL500494400".to_string(), "SCL500494401".to_string()],
        )
        .unwrap_err();
    match err {
        ApiError::ExportacionRechazada { bls_con_errores } => {
            assert_eq!(bls_con_errores.len(), 1);
            assert_eq!(bls_con_errores[0].bl_number, "SCL500494401");
        }
        otro => panic!(
            "se esperaba ExportacionRechazada, vino {:?}",
            otro.to_string()
        ),
    }
}

#[test]
fn test_generar_xmls_multiples_sin_seleccion() {
    let (_tmp, manifiesto_api, _bl_api, _conn) = setup();
    let err = manifiesto_api.generar_xmls_multiples(1, &[]).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}
