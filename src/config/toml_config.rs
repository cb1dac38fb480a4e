use crate::core::session::{DropIntent, DropTarget, INVENTORY_CONTAINER};
use crate::domain::model::{Bay, ModuleId};
use crate::domain::ports::CatalogConfig;
use crate::utils::error::{FitterError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MODULES_RESOURCE: &str = "modules.json";
pub const DEFAULT_STATS_RESOURCE: &str = "stats.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitterConfig {
    pub catalog: CatalogSection,
    #[serde(default)]
    pub bays: Vec<BayConfig>,
    #[serde(default)]
    pub loadout: Vec<LoadoutStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub source: String,
    pub modules: Option<String>,
    pub stats: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayConfig {
    pub id: String,
    pub label: Option<String>,
}

/// One scripted drag-release: `target` is a bay id or `"inventory"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutStep {
    pub module: u32,
    pub target: String,
}

impl BayConfig {
    pub fn to_bay(&self) -> Bay {
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| crate::utils::text::pretty_label(&self.id.replace('-', " ")));
        Bay::new(self.id.clone(), label)
    }
}

impl LoadoutStep {
    pub fn to_intent(&self) -> DropIntent {
        DropIntent {
            module: ModuleId(self.module),
            target: DropTarget::parse(&self.target),
        }
    }
}

impl FitterConfig {
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            catalog: CatalogSection {
                source: source.into(),
                modules: None,
                stats: None,
                timeout_seconds: None,
            },
            bays: Vec::new(),
            loadout: Vec::new(),
        }
    }

    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FitterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FitterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| FitterError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bays(&self) -> Vec<Bay> {
        self.bays.iter().map(BayConfig::to_bay).collect()
    }

    pub fn intents(&self) -> Vec<DropIntent> {
        self.loadout.iter().map(LoadoutStep::to_intent).collect()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_source("catalog.source", &self.catalog.source)?;
        validation::validate_path("catalog.modules", self.modules_resource())?;
        validation::validate_path("catalog.stats", self.stats_resource())?;

        if let Some(timeout) = self.catalog.timeout_seconds {
            validation::validate_positive_number("catalog.timeout_seconds", timeout, 1)?;
        }

        for bay in &self.bays {
            validation::validate_non_empty_string("bays.id", &bay.id)?;
            if bay.id.trim() == INVENTORY_CONTAINER {
                return Err(FitterError::InvalidConfigValueError {
                    field: "bays.id".to_string(),
                    value: bay.id.clone(),
                    reason: format!("'{}' is reserved for the inventory pool", INVENTORY_CONTAINER),
                });
            }
        }
        validation::validate_unique("bays.id", self.bays.iter().map(|b| b.id.as_str()))?;

        for step in &self.loadout {
            validation::validate_non_empty_string("loadout.target", &step.target)?;
        }

        Ok(())
    }
}

impl CatalogConfig for FitterConfig {
    fn source(&self) -> &str {
        &self.catalog.source
    }

    fn modules_resource(&self) -> &str {
        self.catalog
            .modules
            .as_deref()
            .unwrap_or(DEFAULT_MODULES_RESOURCE)
    }

    fn stats_resource(&self) -> &str {
        self.catalog.stats.as_deref().unwrap_or(DEFAULT_STATS_RESOURCE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.catalog.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for FitterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
