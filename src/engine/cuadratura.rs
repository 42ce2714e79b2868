// ==========================================
// Sistema de Manifiestos - Cuadratura item/contenedor
// ==========================================
// Chequeo vivo del flujo de edición: la cantidad declarada de cada item
// debe igualar los contenedores asociados. Bloquea el avance del
// asistente pero NO genera hallazgos persistidos.
// ==========================================

use crate::domain::bl::BlAggregate;
use crate::domain::validacion::{Discrepancia, ResumenCuadratura};

/// Verifica la cuadratura de todos los items de un BL
///
/// Un item sin cantidad declarada se omite: eso ya lo reporta el motor
/// de validación como campo obligatorio.
pub fn verificar(agg: &BlAggregate) -> ResumenCuadratura {
    let discrepancias: Vec<Discrepancia> = agg
        .items
        .iter()
        .filter_map(|item| {
            let cantidad = item.cantidad?;
            let asociados = item.contenedores.len() as i64;
            if cantidad == asociados {
                None
            } else {
                Some(Discrepancia {
                    numero_item: item.numero_item,
                    cantidad,
                    asociados,
                    faltan: cantidad - asociados,
                })
            }
        })
        .collect();

    ResumenCuadratura {
        cuadrado: discrepancias.is_empty(),
        discrepancias,
    }
}
