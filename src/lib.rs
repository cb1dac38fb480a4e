pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{CatalogSource, HttpSource, LocalSource};
pub use app::report::ShipReport;
pub use config::FitterConfig;
pub use self::core::{
    assignment::Assignment,
    loader::CatalogLoader,
    session::{DropIntent, DropTarget, IntentOutcome, Session},
    stats::{derived_stats, DerivedStats},
};
pub use domain::model::{Bay, BayId, Catalog, ModuleDef, ModuleId, StatDef};
pub use utils::error::{FitterError, Result};
