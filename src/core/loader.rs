use crate::domain::model::{Catalog, ModuleDef, StatDef};
use crate::domain::ports::DocumentSource;
use crate::utils::error::{FitterError, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// Fetches and validates the modules and stats documents.
pub struct CatalogLoader<S: DocumentSource> {
    source: S,
    modules_resource: String,
    stats_resource: String,
}

impl<S: DocumentSource> CatalogLoader<S> {
    pub fn new(source: S, modules_resource: impl Into<String>, stats_resource: impl Into<String>) -> Self {
        Self {
            source,
            modules_resource: modules_resource.into(),
            stats_resource: stats_resource.into(),
        }
    }

    pub async fn load(&self) -> Result<Catalog> {
        let modules: Vec<ModuleDef> = self.fetch_document(&self.modules_resource).await?;
        let stats: Vec<StatDef> = self.fetch_document(&self.stats_resource).await?;

        validate_modules(&modules)?;
        validate_stats(&stats)?;

        tracing::info!(
            "📦 Catalog loaded: {} modules, {} stat definitions",
            modules.len(),
            stats.len()
        );
        Ok(Catalog::new(modules, stats))
    }

    /// Load failures are logged and leave the catalog empty. No retry.
    pub async fn load_or_empty(&self) -> Catalog {
        match self.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(
                    "❌ Catalog load failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::warn!("Continuing with an empty catalog and default stats");
                Catalog::empty()
            }
        }
    }

    async fn fetch_document<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        tracing::debug!("Fetching catalog document: {}", self.source.describe(resource));
        let bytes = self.source.fetch(resource).await?;
        tracing::debug!("Received {} bytes for {}", bytes.len(), resource);

        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        if !value.is_array() {
            return Err(FitterError::CatalogLoadError {
                resource: resource.to_string(),
                reason: "expected a JSON array at the top level".to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| FitterError::CatalogLoadError {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }
}

fn validate_modules(modules: &[ModuleDef]) -> Result<()> {
    let mut seen = HashSet::new();
    for module in modules {
        if !seen.insert(module.id) {
            return Err(FitterError::DuplicateModuleError { id: module.id.0 });
        }
        if module.name.trim().is_empty() {
            return Err(FitterError::CatalogLoadError {
                resource: "modules".to_string(),
                reason: format!("module {} has an empty name", module.id),
            });
        }
    }
    Ok(())
}

fn validate_stats(stats: &[StatDef]) -> Result<()> {
    let mut seen = HashSet::new();
    for stat in stats {
        if stat.stat_name.trim().is_empty() {
            return Err(FitterError::CatalogLoadError {
                resource: "stats".to_string(),
                reason: "stat definition with an empty name".to_string(),
            });
        }
        if !seen.insert(stat.stat_name.as_str()) {
            return Err(FitterError::DuplicateStatError {
                name: stat.stat_name.clone(),
            });
        }
    }
    Ok(())
}
