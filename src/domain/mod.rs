// ==========================================
// Sistema de Manifiestos - Capa de dominio
// ==========================================

pub mod bl;
pub mod catalogo;
pub mod manifiesto;
pub mod types;
pub mod validacion;

pub use bl::{Bl, BlAggregate, Contenedor, Imo, Item, Transbordo};
pub use catalogo::{Catalogo, Puerto};
pub use manifiesto::{BlParaXml, Manifiesto};
pub use types::{EstadoBl, Nivel, Severidad, TipoServicio, ValidStatus};
pub use validacion::{Discrepancia, EstadoValidacion, ResumenCuadratura, Validacion};
