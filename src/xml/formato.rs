// ==========================================
// Sistema de Manifiestos - Formatos del documento BMS/SNA
// ==========================================
// Los formatos de salida son contrato bit a bit con el sistema aduanero:
// 3 decimales para peso/volumen, fechas ISO, salida ISO-8859-1.
// ==========================================

use chrono::NaiveDate;

/// Magnitud con 3 decimales fijos (peso y volumen)
pub fn decimal3(valor: f64) -> String {
    format!("{:.3}", valor)
}

/// Magnitud opcional; ausente se emite vacío
pub fn opt_decimal3(valor: Option<f64>) -> String {
    valor.map(decimal3).unwrap_or_default()
}

/// Fecha en formato YYYY-MM-DD
pub fn fecha(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn opt_fecha(d: Option<NaiveDate>) -> String {
    d.map(fecha).unwrap_or_default()
}

/// Codifica el documento a ISO-8859-1
///
/// El repertorio del dominio (texto castellano) coincide con windows-1252
/// en todos los puntos usados.
pub fn a_latin1(s: &str) -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(s);
    bytes.into_owned()
}
