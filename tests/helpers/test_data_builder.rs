// ==========================================
// Constructor de datos de prueba - BLs completos en base de datos
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;

// ==========================================
// BlBuilder
// ==========================================
// Parte de un BL completo y válido; los tests degradan campos puntuales
// con los setters antes de insertar.

pub struct BlBuilder {
    bl_number: String,
    manifiesto_id: i64,
    viaje: Option<String>,
    tipo_servicio: Option<String>,
    fecha_emision: Option<String>,
    fecha_presentacion: Option<String>,
    fecha_zarpe: Option<String>,
    fecha_carga: Option<String>,
    puerto_origen: Option<String>,
    lugar_recepcion: Option<String>,
    puerto_embarque: Option<String>,
    puerto_descarga: Option<String>,
    puerto_destino: Option<String>,
    lugar_entrega: Option<String>,
    lugar_emision: Option<String>,
    embarcador: Option<String>,
    consignatario: Option<String>,
    notificante: Option<String>,
    descripcion_carga: Option<String>,
    peso_bruto: Option<f64>,
    peso_unidad: Option<String>,
    volumen: Option<f64>,
    volumen_unidad: Option<String>,
    total_bultos: Option<i64>,
    estado: String,
    items: Vec<ItemSpec>,
    contenedores: Vec<ContenedorSpec>,
    asociaciones: Vec<(i64, i64)>,
    sellos: Vec<(i64, String)>,
    imos: Vec<(i64, String, String)>,
    transbordos: Vec<(i64, String)>,
}

struct ItemSpec {
    numero: i64,
    cantidad: Option<i64>,
    tipo_bulto: Option<String>,
    peso: Option<f64>,
    volumen: Option<f64>,
    peligrosa: bool,
}

struct ContenedorSpec {
    sec: i64,
    codigo: String,
    tipo_cnt: Option<String>,
}

impl BlBuilder {
    /// BL completo y válido según el reglamento BMS
    pub fn completo(bl_number: &str, manifiesto_id: i64) -> Self {
        Self {
            bl_number: bl_number.to_string(),
            manifiesto_id,
            viaje: Some("2024-117E".to_string()),
            tipo_servicio: Some("FF".to_string()),
            fecha_emision: Some("2024-05-01".to_string()),
            fecha_presentacion: Some("2024-05-02".to_string()),
            fecha_zarpe: Some("2024-05-10".to_string()),
            fecha_carga: Some("2024-05-08".to_string()),
            puerto_origen: Some("CLVAP".to_string()),
            lugar_recepcion: Some("CLVAP".to_string()),
            puerto_embarque: Some("CLVAP".to_string()),
            puerto_descarga: Some("NLRTM".to_string()),
            puerto_destino: Some("NLRTM".to_string()),
            lugar_entrega: Some("NLRTM".to_string()),
            lugar_emision: Some("CLVAP".to_string()),
            embarcador: Some("EXPORTADORA ANDINA LTDA".to_string()),
            consignatario: Some("EUROPEAN IMPORTS BV".to_string()),
            notificante: Some("NOTIFY PARTY GMBH".to_string()),
            descripcion_carga: Some("CAJAS DE FRUTA FRESCA".to_string()),
            peso_bruto: Some(12500.5),
            peso_unidad: Some("KGM".to_string()),
            volumen: Some(28.4),
            volumen_unidad: Some("MTQ".to_string()),
            total_bultos: Some(10),
            estado: "CREADO".to_string(),
            items: Vec::new(),
            contenedores: Vec::new(),
            asociaciones: Vec::new(),
            sellos: Vec::new(),
            imos: Vec::new(),
            transbordos: Vec::new(),
        }
    }

    pub fn tipo_servicio(mut self, servicio: &str) -> Self {
        self.tipo_servicio = Some(servicio.to_string());
        self
    }

    pub fn peso_bruto(mut self, peso: f64) -> Self {
        self.peso_bruto = Some(peso);
        self
    }

    pub fn sin_peso_bruto(mut self) -> Self {
        self.peso_bruto = None;
        self
    }

    pub fn sin_fecha_zarpe(mut self) -> Self {
        self.fecha_zarpe = None;
        self
    }

    pub fn sin_embarcador(mut self) -> Self {
        self.embarcador = None;
        self
    }

    pub fn puerto_destino(mut self, codigo: &str) -> Self {
        self.puerto_destino = Some(codigo.to_string());
        self
    }

    pub fn estado(mut self, estado: &str) -> Self {
        self.estado = estado.to_string();
        self
    }

    /// Item completo (peso/volumen/tipo de bulto válidos)
    pub fn item(mut self, numero: i64, cantidad: i64) -> Self {
        self.items.push(ItemSpec {
            numero,
            cantidad: Some(cantidad),
            tipo_bulto: Some("CT20".to_string()),
            peso: Some(1250.0),
            volumen: Some(2.84),
            peligrosa: false,
        });
        self
    }

    pub fn item_peligroso(mut self, numero: i64, cantidad: i64) -> Self {
        self.items.push(ItemSpec {
            numero,
            cantidad: Some(cantidad),
            tipo_bulto: Some("CT20".to_string()),
            peso: Some(1250.0),
            volumen: Some(2.84),
            peligrosa: true,
        });
        self
    }

    pub fn item_sin_cantidad(mut self, numero: i64) -> Self {
        self.items.push(ItemSpec {
            numero,
            cantidad: None,
            tipo_bulto: Some("CT20".to_string()),
            peso: Some(1250.0),
            volumen: Some(2.84),
            peligrosa: false,
        });
        self
    }

    pub fn contenedor(mut self, sec: i64, codigo: &str) -> Self {
        self.contenedores.push(ContenedorSpec {
            sec,
            codigo: codigo.to_string(),
            tipo_cnt: None, // derivado vía tipo_cnt_map al cargar
        });
        self
    }

    pub fn asociar(mut self, numero_item: i64, contenedor_sec: i64) -> Self {
        self.asociaciones.push((numero_item, contenedor_sec));
        self
    }

    pub fn sello(mut self, contenedor_sec: i64, sello: &str) -> Self {
        self.sellos.push((contenedor_sec, sello.to_string()));
        self
    }

    pub fn imo(mut self, contenedor_sec: i64, clase: &str, numero: &str) -> Self {
        self.imos
            .push((contenedor_sec, clase.to_string(), numero.to_string()));
        self
    }

    pub fn transbordo(mut self, sec: i64, puerto_id: &str) -> Self {
        self.transbordos.push((sec, puerto_id.to_string()));
        self
    }

    /// Inserta el BL y todo su agregado
    pub fn insertar(self, conn: &Connection) -> Result<(), Box<dyn Error>> {
        conn.execute(
            "INSERT INTO bls (bl_number, manifiesto_id, viaje, tipo_servicio,
                              fecha_emision, fecha_presentacion, fecha_zarpe, fecha_carga,
                              puerto_origen, lugar_recepcion, puerto_embarque, puerto_descarga,
                              puerto_destino, lugar_entrega, lugar_emision,
                              embarcador, consignatario, notificante,
                              descripcion_carga, peso_bruto, peso_unidad,
                              volumen, volumen_unidad, total_bultos, estado)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                     ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
            params![
                self.bl_number,
                self.manifiesto_id,
                self.viaje,
                self.tipo_servicio,
                self.fecha_emision,
                self.fecha_presentacion,
                self.fecha_zarpe,
                self.fecha_carga,
                self.puerto_origen,
                self.lugar_recepcion,
                self.puerto_embarque,
                self.puerto_descarga,
                self.puerto_destino,
                self.lugar_entrega,
                self.lugar_emision,
                self.embarcador,
                self.consignatario,
                self.notificante,
                self.descripcion_carga,
                self.peso_bruto,
                self.peso_unidad,
                self.volumen,
                self.volumen_unidad,
                self.total_bultos,
                self.estado,
            ],
        )?;

        for item in &self.items {
            conn.execute(
                "INSERT INTO bl_items (bl_number, numero_item, descripcion, marcas, tipo_bulto,
                                       cantidad, peso, peso_unidad, volumen, volumen_unidad,
                                       carga_peligrosa)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'KGM', ?8, 'MTQ', ?9)",
                params![
                    self.bl_number,
                    item.numero,
                    "MERCADERIA GENERAL",
                    "S/M",
                    item.tipo_bulto,
                    item.cantidad,
                    item.peso,
                    item.volumen,
                    if item.peligrosa { "S" } else { "N" },
                ],
            )?;
        }

        for c in &self.contenedores {
            conn.execute(
                "INSERT INTO bl_contenedores (bl_number, sec, codigo, tipo_cnt,
                                              peso, peso_unidad, volumen, volumen_unidad)
                 VALUES (?1, ?2, ?3, ?4, 2180.0, 'KGM', 33.2, 'MTQ')",
                params![self.bl_number, c.sec, c.codigo, c.tipo_cnt],
            )?;
        }

        for (numero_item, contenedor_sec) in &self.asociaciones {
            conn.execute(
                "INSERT INTO bl_item_contenedor (bl_number, numero_item, contenedor_sec)
                 VALUES (?1, ?2, ?3)",
                params![self.bl_number, numero_item, contenedor_sec],
            )?;
        }

        for (contenedor_sec, sello) in &self.sellos {
            conn.execute(
                "INSERT INTO bl_sellos (bl_number, contenedor_sec, sello) VALUES (?1, ?2, ?3)",
                params![self.bl_number, contenedor_sec, sello],
            )?;
        }

        for (contenedor_sec, clase, numero) in &self.imos {
            conn.execute(
                "INSERT INTO bl_imos (bl_number, contenedor_sec, clase, numero)
                 VALUES (?1, ?2, ?3, ?4)",
                params![self.bl_number, contenedor_sec, clase, numero],
            )?;
        }

        for (sec, puerto_id) in &self.transbordos {
            conn.execute(
                "INSERT INTO bl_transbordos (bl_number, sec, puerto_id) VALUES (?1, ?2, ?3)",
                params![self.bl_number, sec, puerto_id],
            )?;
        }

        Ok(())
    }
}
