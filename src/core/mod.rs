pub mod assignment;
pub mod inventory;
pub mod loader;
pub mod session;
pub mod stats;

pub use crate::domain::model::{Bay, BayId, Catalog, ModuleDef, ModuleId, StatDef};
pub use crate::domain::ports::{CatalogConfig, DocumentSource};
pub use crate::utils::error::Result;
