// ==========================================
// Sistema de Manifiestos - Generación de documentos XML
// ==========================================

pub mod codec;
pub mod formato;

pub use codec::{CodecBms, CodecError, CodecResult};
