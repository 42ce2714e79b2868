// ==========================================
// Sistema de Manifiestos - Motor de validación de BLs
// ==========================================
// Responsabilidad: recorrer el agregado del BL contra el reglamento de
// completitud BMS/SNA y emitir hallazgos clasificados por severidad.
// Sin estado, sin efectos, sin I/O: el catálogo llega ya resuelto.
//
// Política ERROR vs OBS: lo que deja el XML fuera de norma (campo
// obligatorio ausente, IMO faltante, puerto de transbordo no registrado)
// es ERROR y bloquea la exportación; lo que solo degrada la calidad del
// dato (puerto de encabezado no registrado, el codec puede emitir el
// código crudo) es OBS.
// ==========================================

use crate::domain::bl::{BlAggregate, Item};
use crate::domain::catalogo::Catalogo;
use crate::domain::types::{Nivel, TipoServicio};
use crate::domain::validacion::Validacion;

/// Slots de puerto/lugar del encabezado: (campo, etiqueta, requerido)
///
/// lugar_emision no es obligatorio pero sí se observa si trae un
/// código no registrado.
const SLOTS_PUERTO: &[(&str, &str, bool)] = &[
    ("puerto_origen", "Puerto Origen", true),
    ("lugar_recepcion", "Lugar Recepción", true),
    ("puerto_embarque", "Puerto Embarque", true),
    ("puerto_descarga", "Puerto Descarga", true),
    ("puerto_destino", "Puerto Destino", true),
    ("lugar_entrega", "Lugar Entrega", true),
    ("lugar_emision", "Lugar Emisión", false),
];

/// Largo mínimo del texto de un participante (embarcador/consignatario/notificante)
const MIN_LARGO_PARTICIPANTE: usize = 5;

pub struct ValidacionEngine;

impl ValidacionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Valida el agregado completo de un BL
    ///
    /// # Parámetros
    /// - agg: agregado materializado por la capa de repositorio
    /// - catalogo: vista de puertos resuelta para esta solicitud
    ///
    /// # Retorna
    /// - Hallazgos en orden de presentación (encabezado, registro de
    ///   puertos, items, contenedores, transbordos). El orden solo afecta
    ///   al reporte: las reglas son independientes entre sí.
    pub fn validar(&self, agg: &BlAggregate, catalogo: &Catalogo) -> Vec<Validacion> {
        let mut hallazgos = Vec::new();

        self.validar_encabezado(agg, &mut hallazgos);
        self.validar_puertos_registrados(agg, catalogo, &mut hallazgos);
        self.validar_items(agg, &mut hallazgos);
        self.validar_contenedores(agg, &mut hallazgos);
        self.validar_transbordos(agg, catalogo, &mut hallazgos);

        hallazgos
    }

    // ==========================================
    // Regla 1: campos obligatorios del encabezado
    // ==========================================
    fn validar_encabezado(&self, agg: &BlAggregate, hallazgos: &mut Vec<Validacion>) {
        let bl = &agg.bl;
        let es_mm = bl.tipo_servicio == Some(TipoServicio::Mm);

        if bl.tipo_servicio.is_none() {
            hallazgos.push(Validacion::error_bl(
                "tipo_servicio",
                "tipo de servicio requerido",
            ));
        }

        for (campo, _, requerido) in SLOTS_PUERTO {
            if !requerido {
                continue;
            }
            if !texto_presente(slot_puerto(agg, campo)) {
                hallazgos.push(Validacion::error_bl(
                    campo,
                    &format!("{} requerido", etiqueta_slot(campo)),
                ));
            }
        }

        if bl.fecha_emision.is_none() {
            hallazgos.push(Validacion::error_bl("fecha_emision", "fecha de emisión requerida"));
        }
        if bl.fecha_presentacion.is_none() {
            hallazgos.push(Validacion::error_bl(
                "fecha_presentacion",
                "fecha de presentación requerida",
            ));
        }
        if bl.fecha_zarpe.is_none() {
            hallazgos.push(Validacion::error_bl("fecha_zarpe", "fecha de zarpe requerida"));
        }
        if bl.fecha_carga.is_none() {
            hallazgos.push(Validacion::error_bl("fecha_carga", "fecha de carga requerida"));
        }

        for (campo, valor) in [
            ("embarcador", &bl.embarcador),
            ("consignatario", &bl.consignatario),
            ("notificante", &bl.notificante),
        ] {
            if !texto_minimo(valor.as_deref(), MIN_LARGO_PARTICIPANTE) {
                hallazgos.push(Validacion::error_bl(
                    campo,
                    &format!("{} requerido (mínimo {} caracteres)", campo, MIN_LARGO_PARTICIPANTE),
                ));
            }
        }

        self.validar_magnitud(
            hallazgos,
            bl.peso_bruto,
            bl.peso_unidad.as_deref(),
            es_mm,
            "peso_bruto",
            "peso bruto",
            "peso_unidad",
            "unidad de peso",
        );
        self.validar_magnitud(
            hallazgos,
            bl.volumen,
            bl.volumen_unidad.as_deref(),
            es_mm,
            "volumen",
            "volumen",
            "volumen_unidad",
            "unidad de volumen",
        );

        match bl.total_bultos {
            Some(n) if n > 0 => {}
            _ => hallazgos.push(Validacion::error_bl(
                "total_bultos",
                "total de bultos debe ser mayor a 0",
            )),
        }
    }

    /// Valida una magnitud numérica (peso o volumen) con su unidad
    ///
    /// # Reglas
    /// - ausente => ERROR requerido
    /// - negativa => ERROR (en cualquier tipo de servicio)
    /// - cero => ERROR salvo servicio MM (contenedor vacío)
    /// - unidad ausente => ERROR
    #[allow(clippy::too_many_arguments)]
    fn validar_magnitud(
        &self,
        hallazgos: &mut Vec<Validacion>,
        valor: Option<f64>,
        unidad: Option<&str>,
        es_mm: bool,
        campo: &str,
        nombre: &str,
        campo_unidad: &str,
        nombre_unidad: &str,
    ) {
        match valor {
            None => hallazgos.push(Validacion::error_bl(campo, &format!("{} requerido", nombre))),
            Some(v) if v < 0.0 => hallazgos.push(Validacion::error_bl(
                campo,
                &format!("{} no puede ser negativo", nombre),
            )),
            Some(v) if v == 0.0 && !es_mm => hallazgos.push(Validacion::error_bl(
                campo,
                &format!("{} debe ser mayor a 0", nombre),
            )),
            Some(_) => {}
        }
        if !texto_presente(unidad) {
            hallazgos.push(Validacion::error_bl(
                campo_unidad,
                &format!("{} requerida", nombre_unidad),
            ));
        }
    }

    // ==========================================
    // Regla 2: puertos de encabezado no registrados (OBS)
    // ==========================================
    fn validar_puertos_registrados(
        &self,
        agg: &BlAggregate,
        catalogo: &Catalogo,
        hallazgos: &mut Vec<Validacion>,
    ) {
        for (campo, etiqueta, _) in SLOTS_PUERTO {
            if let Some(codigo) = slot_puerto(agg, campo) {
                let codigo = codigo.trim();
                if !codigo.is_empty() && catalogo.puerto(codigo).is_none() {
                    hallazgos.push(Validacion::obs_bl(etiqueta, "puerto no registrado"));
                }
            }
        }
    }

    // ==========================================
    // Regla 3: campos obligatorios por item
    // ==========================================
    fn validar_items(&self, agg: &BlAggregate, hallazgos: &mut Vec<Validacion>) {
        let es_mm = agg.bl.tipo_servicio == Some(TipoServicio::Mm);
        for item in &agg.items {
            self.validar_item(item, es_mm, hallazgos);
        }
    }

    fn validar_item(&self, item: &Item, es_mm: bool, hallazgos: &mut Vec<Validacion>) {
        let sec = item.numero_item;

        match item.peso {
            None => hallazgos.push(Validacion::error(
                Nivel::Item,
                "peso",
                sec,
                "peso del item requerido",
            )),
            Some(v) if v < 0.0 => hallazgos.push(Validacion::error(
                Nivel::Item,
                "peso",
                sec,
                "peso del item no puede ser negativo",
            )),
            Some(v) if v == 0.0 && !es_mm => hallazgos.push(Validacion::error(
                Nivel::Item,
                "peso",
                sec,
                "peso del item debe ser mayor a 0",
            )),
            Some(_) => {}
        }
        if !texto_presente(item.peso_unidad.as_deref()) {
            hallazgos.push(Validacion::error(
                Nivel::Item,
                "peso_unidad",
                sec,
                "unidad de peso del item requerida",
            ));
        }

        match item.volumen {
            None => hallazgos.push(Validacion::error(
                Nivel::Item,
                "volumen",
                sec,
                "volumen del item requerido",
            )),
            Some(v) if v < 0.0 => hallazgos.push(Validacion::error(
                Nivel::Item,
                "volumen",
                sec,
                "volumen del item no puede ser negativo",
            )),
            Some(v) if v == 0.0 && !es_mm => hallazgos.push(Validacion::error(
                Nivel::Item,
                "volumen",
                sec,
                "volumen del item debe ser mayor a 0",
            )),
            Some(_) => {}
        }
        if !texto_presente(item.volumen_unidad.as_deref()) {
            hallazgos.push(Validacion::error(
                Nivel::Item,
                "volumen_unidad",
                sec,
                "unidad de volumen del item requerida",
            ));
        }

        if !texto_presente(item.tipo_bulto.as_deref()) {
            hallazgos.push(Validacion::error(
                Nivel::Item,
                "tipo_bulto",
                sec,
                "tipo de bulto requerido",
            ));
        }

        // la descripción NO es obligatoria
        match item.cantidad {
            Some(n) if n > 0 => {}
            _ => hallazgos.push(Validacion::error(
                Nivel::Item,
                "cantidad",
                sec,
                "cantidad debe ser mayor a 0",
            )),
        }
    }

    // ==========================================
    // Regla 4: contenedor con carga peligrosa sin entradas IMO
    // ==========================================
    fn validar_contenedores(&self, agg: &BlAggregate, hallazgos: &mut Vec<Validacion>) {
        let peligrosos = agg.secs_con_carga_peligrosa();
        for contenedor in &agg.contenedores {
            if peligrosos.binary_search(&contenedor.sec).is_ok() && contenedor.imos.is_empty() {
                hallazgos.push(Validacion::error(
                    Nivel::Contenedor,
                    "imos",
                    contenedor.sec,
                    "contenedor con carga peligrosa requiere al menos una entrada IMO",
                ));
            }
        }
    }

    // ==========================================
    // Regla 5: transbordo con puerto no registrado (ERROR)
    // ==========================================
    // A diferencia del encabezado, aquí el documento necesita el nombre
    // resuelto del puerto, por eso bloquea.
    fn validar_transbordos(
        &self,
        agg: &BlAggregate,
        catalogo: &Catalogo,
        hallazgos: &mut Vec<Validacion>,
    ) {
        for transbordo in &agg.transbordos {
            if catalogo.puerto(&transbordo.puerto_id).is_none() {
                hallazgos.push(Validacion::error(
                    Nivel::Transbordo,
                    "puerto_id",
                    transbordo.sec,
                    "puerto no registrado",
                ));
            }
        }
    }
}

impl Default for ValidacionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// Auxiliares
// ==========================================

fn texto_presente(valor: Option<&str>) -> bool {
    valor.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn texto_minimo(valor: Option<&str>, min: usize) -> bool {
    valor.map(|v| v.trim().chars().count() >= min).unwrap_or(false)
}

fn slot_puerto<'a>(agg: &'a BlAggregate, campo: &str) -> Option<&'a str> {
    let bl = &agg.bl;
    let valor = match campo {
        "puerto_origen" => &bl.puerto_origen,
        "lugar_recepcion" => &bl.lugar_recepcion,
        "puerto_embarque" => &bl.puerto_embarque,
        "puerto_descarga" => &bl.puerto_descarga,
        "puerto_destino" => &bl.puerto_destino,
        "lugar_entrega" => &bl.lugar_entrega,
        "lugar_emision" => &bl.lugar_emision,
        _ => return None,
    };
    valor.as_deref()
}

fn etiqueta_slot(campo: &str) -> String {
    match campo {
        "puerto_origen" => "puerto de origen".to_string(),
        "lugar_recepcion" => "lugar de recepción".to_string(),
        "puerto_embarque" => "puerto de embarque".to_string(),
        "puerto_descarga" => "puerto de descarga".to_string(),
        "puerto_destino" => "puerto de destino".to_string(),
        "lugar_entrega" => "lugar de entrega".to_string(),
        "lugar_emision" => "lugar de emisión".to_string(),
        _ => campo.to_string(),
    }
}
