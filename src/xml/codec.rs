// ==========================================
// Sistema de Manifiestos - Codec XML BMS/SNA
// ==========================================
// Responsabilidad: serializar un agregado de BL ya validado al documento
// BMS/SNA v1.0. Serializador puro: NO revalida (el gate de ERROR es del
// llamador) y no persiste nada; la vista previa usa los mismos bytes.
//
// Determinismo: orden de secciones y campos fijo, items por numero_item,
// contenedores por sec, transbordos por sec intercalados entre embarque
// y descarga. Mismo agregado => mismos bytes.
// ==========================================

use crate::domain::bl::{BlAggregate, Contenedor, Item};
use crate::domain::catalogo::Catalogo;
use crate::xml::formato;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

/// Errores del codec (solo fallas de serialización, nunca de negocio)
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("error de escritura XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("error de E/S generando XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("error de codificación: {0}")]
    Codificacion(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

type XmlWriter = Writer<Vec<u8>>;

pub struct CodecBms;

impl CodecBms {
    pub fn new() -> Self {
        Self
    }

    /// Serializa el agregado a bytes ISO-8859-1 del documento BMS/SNA
    ///
    /// # Parámetros
    /// - agg: agregado del BL (el llamador garantiza valid_status != ERROR)
    /// - catalogo: puertos resueltos para nombres de ruta
    pub fn codificar(&self, agg: &BlAggregate, catalogo: &Catalogo) -> CodecResult<Vec<u8>> {
        let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);

        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("ISO-8859-1"), None)))?;

        let mut raiz = BytesStart::new("MANIFIESTO_BL");
        raiz.push_attribute(("version", "1.0"));
        w.write_event(Event::Start(raiz))?;

        self.escribir_encabezado(&mut w, agg)?;
        self.escribir_ruta(&mut w, agg, catalogo)?;
        self.escribir_participantes(&mut w, agg)?;
        self.escribir_carga(&mut w, agg)?;
        self.escribir_items(&mut w, agg)?;
        self.escribir_contenedores(&mut w, agg)?;

        w.write_event(Event::End(BytesEnd::new("MANIFIESTO_BL")))?;

        let utf8 = String::from_utf8(w.into_inner())
            .map_err(|e| CodecError::Codificacion(e.to_string()))?;
        Ok(formato::a_latin1(&utf8))
    }

    // ==========================================
    // ENCABEZADO
    // ==========================================
    fn escribir_encabezado(&self, w: &mut XmlWriter, agg: &BlAggregate) -> CodecResult<()> {
        let bl = &agg.bl;
        abrir(w, "ENCABEZADO")?;

        texto(w, "NRO_BL", &bl.bl_number)?;
        texto(w, "VIAJE", bl.viaje.as_deref().unwrap_or(""))?;
        texto(
            w,
            "TIPO_SERVICIO",
            bl.tipo_servicio.map(|t| t.as_str()).unwrap_or(""),
        )?;
        texto(w, "ESTADO", bl.estado.as_str())?;
        texto(w, "FECHA_EMISION", &formato::opt_fecha(bl.fecha_emision))?;
        texto(
            w,
            "FECHA_PRESENTACION",
            &formato::opt_fecha(bl.fecha_presentacion),
        )?;
        texto(w, "FECHA_ZARPE", &formato::opt_fecha(bl.fecha_zarpe))?;
        texto(w, "FECHA_CARGA", &formato::opt_fecha(bl.fecha_carga))?;
        magnitud(w, "PESO_BRUTO", bl.peso_bruto, bl.peso_unidad.as_deref())?;
        magnitud(w, "VOLUMEN", bl.volumen, bl.volumen_unidad.as_deref())?;
        texto(
            w,
            "TOTAL_BULTOS",
            &bl.total_bultos.map(|n| n.to_string()).unwrap_or_default(),
        )?;

        cerrar(w, "ENCABEZADO")
    }

    // ==========================================
    // RUTA (transbordos intercalados entre embarque y descarga)
    // ==========================================
    fn escribir_ruta(
        &self,
        w: &mut XmlWriter,
        agg: &BlAggregate,
        catalogo: &Catalogo,
    ) -> CodecResult<()> {
        let bl = &agg.bl;
        abrir(w, "RUTA")?;

        puerto(w, "PUERTO_ORIGEN", bl.puerto_origen.as_deref(), catalogo)?;
        puerto(w, "LUGAR_RECEPCION", bl.lugar_recepcion.as_deref(), catalogo)?;
        puerto(w, "PUERTO_EMBARQUE", bl.puerto_embarque.as_deref(), catalogo)?;

        let mut transbordos = agg.transbordos.clone();
        transbordos.sort_by_key(|t| t.sec);
        for t in &transbordos {
            let nombre = t
                .puerto_nombre
                .as_deref()
                .or_else(|| catalogo.nombre_puerto(&t.puerto_id))
                .unwrap_or("");
            let mut inicio = BytesStart::new("TRANSBORDO");
            inicio.push_attribute(("sec", t.sec.to_string().as_str()));
            inicio.push_attribute(("codigo", t.puerto_id.as_str()));
            w.write_event(Event::Start(inicio))?;
            w.write_event(Event::Text(BytesText::new(nombre)))?;
            w.write_event(Event::End(BytesEnd::new("TRANSBORDO")))?;
        }

        puerto(w, "PUERTO_DESCARGA", bl.puerto_descarga.as_deref(), catalogo)?;
        puerto(w, "PUERTO_DESTINO", bl.puerto_destino.as_deref(), catalogo)?;
        puerto(w, "LUGAR_ENTREGA", bl.lugar_entrega.as_deref(), catalogo)?;
        puerto(w, "LUGAR_EMISION", bl.lugar_emision.as_deref(), catalogo)?;

        cerrar(w, "RUTA")
    }

    // ==========================================
    // PARTICIPANTES
    // ==========================================
    fn escribir_participantes(&self, w: &mut XmlWriter, agg: &BlAggregate) -> CodecResult<()> {
        let bl = &agg.bl;
        abrir(w, "PARTICIPANTES")?;
        texto(w, "EMBARCADOR", bl.embarcador.as_deref().unwrap_or(""))?;
        texto(w, "CONSIGNATARIO", bl.consignatario.as_deref().unwrap_or(""))?;
        texto(w, "NOTIFICANTE", bl.notificante.as_deref().unwrap_or(""))?;
        cerrar(w, "PARTICIPANTES")
    }

    // ==========================================
    // CARGA
    // ==========================================
    fn escribir_carga(&self, w: &mut XmlWriter, agg: &BlAggregate) -> CodecResult<()> {
        abrir(w, "CARGA")?;
        texto(
            w,
            "DESCRIPCION",
            agg.bl.descripcion_carga.as_deref().unwrap_or(""),
        )?;
        cerrar(w, "CARGA")
    }

    // ==========================================
    // ITEMS
    // ==========================================
    fn escribir_items(&self, w: &mut XmlWriter, agg: &BlAggregate) -> CodecResult<()> {
        abrir(w, "ITEMS")?;
        let mut items: Vec<&Item> = agg.items.iter().collect();
        items.sort_by_key(|i| i.numero_item);
        for item in items {
            let mut inicio = BytesStart::new("ITEM");
            inicio.push_attribute(("sec", item.numero_item.to_string().as_str()));
            w.write_event(Event::Start(inicio))?;

            texto(w, "DESCRIPCION", item.descripcion.as_deref().unwrap_or(""))?;
            texto(w, "MARCAS", item.marcas.as_deref().unwrap_or(""))?;
            texto(w, "TIPO_BULTO", item.tipo_bulto.as_deref().unwrap_or(""))?;
            texto(
                w,
                "CANTIDAD",
                &item.cantidad.map(|n| n.to_string()).unwrap_or_default(),
            )?;
            magnitud(w, "PESO", item.peso, item.peso_unidad.as_deref())?;
            magnitud(w, "VOLUMEN", item.volumen, item.volumen_unidad.as_deref())?;
            texto(
                w,
                "CARGA_PELIGROSA",
                if item.carga_peligrosa { "S" } else { "N" },
            )?;

            w.write_event(Event::End(BytesEnd::new("ITEM")))?;
        }
        cerrar(w, "ITEMS")
    }

    // ==========================================
    // CONTENEDORES (con SELLOS e IMOS anidados)
    // ==========================================
    fn escribir_contenedores(&self, w: &mut XmlWriter, agg: &BlAggregate) -> CodecResult<()> {
        abrir(w, "CONTENEDORES")?;
        let mut contenedores: Vec<&Contenedor> = agg.contenedores.iter().collect();
        contenedores.sort_by_key(|c| c.sec);
        for c in contenedores {
            let mut inicio = BytesStart::new("CONTENEDOR");
            inicio.push_attribute(("sec", c.sec.to_string().as_str()));
            w.write_event(Event::Start(inicio))?;

            texto(w, "CODIGO", &c.codigo)?;
            texto(w, "TIPO_CNT", c.tipo_cnt.as_deref().unwrap_or(""))?;
            magnitud(w, "PESO", c.peso, c.peso_unidad.as_deref())?;
            magnitud(w, "VOLUMEN", c.volumen, c.volumen_unidad.as_deref())?;

            abrir(w, "SELLOS")?;
            for sello in &c.sellos {
                texto(w, "SELLO", sello)?;
            }
            cerrar(w, "SELLOS")?;

            abrir(w, "IMOS")?;
            for imo in &c.imos {
                abrir(w, "IMO")?;
                texto(w, "CLASE", &imo.clase)?;
                texto(w, "NUMERO", &imo.numero)?;
                cerrar(w, "IMO")?;
            }
            cerrar(w, "IMOS")?;

            w.write_event(Event::End(BytesEnd::new("CONTENEDOR")))?;
        }
        cerrar(w, "CONTENEDORES")
    }
}

impl Default for CodecBms {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// Auxiliares de escritura
// ==========================================

fn abrir(w: &mut XmlWriter, tag: &str) -> CodecResult<()> {
    w.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn cerrar(w: &mut XmlWriter, tag: &str) -> CodecResult<()> {
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Elemento simple con contenido de texto (escape automático)
fn texto(w: &mut XmlWriter, tag: &str, contenido: &str) -> CodecResult<()> {
    w.write_event(Event::Start(BytesStart::new(tag)))?;
    w.write_event(Event::Text(BytesText::new(contenido)))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Magnitud con unidad como atributo y 3 decimales fijos
fn magnitud(
    w: &mut XmlWriter,
    tag: &str,
    valor: Option<f64>,
    unidad: Option<&str>,
) -> CodecResult<()> {
    let mut inicio = BytesStart::new(tag);
    inicio.push_attribute(("unidad", unidad.unwrap_or("")));
    w.write_event(Event::Start(inicio))?;
    w.write_event(Event::Text(BytesText::new(&formato::opt_decimal3(valor))))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Slot de puerto: código como atributo, nombre de catálogo como texto.
/// Un código no registrado se emite con el texto vacío (el dato degradado
/// ya fue observado por el motor de validación).
fn puerto(
    w: &mut XmlWriter,
    tag: &str,
    codigo: Option<&str>,
    catalogo: &Catalogo,
) -> CodecResult<()> {
    let codigo = codigo.unwrap_or("").trim();
    let nombre = catalogo.nombre_puerto(codigo).unwrap_or("");
    let mut inicio = BytesStart::new(tag);
    inicio.push_attribute(("codigo", codigo));
    w.write_event(Event::Start(inicio))?;
    w.write_event(Event::Text(BytesText::new(nombre)))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
