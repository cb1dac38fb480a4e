use crate::config::toml_config::{BayConfig, FitterConfig, LoadoutStep};
use crate::utils::error::{FitterError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "ship-fitter")]
#[command(about = "Fit ship modules into equipment bays and report the resulting ship stats")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog location: http(s) base URL or local directory
    #[arg(long)]
    pub source: Option<String>,

    /// Modules document, relative to the source
    #[arg(long)]
    pub modules: Option<String>,

    /// Stat definitions document, relative to the source
    #[arg(long)]
    pub stats: Option<String>,

    /// Request timeout for HTTP sources
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Equipment bay, as `id` or `id=Label` (repeatable)
    #[arg(long = "bay", value_parser = parse_bay)]
    pub bays: Vec<BayConfig>,

    /// Equip a module, as `module=bay` (repeatable, applied in order)
    #[arg(long = "equip", value_parser = parse_equip)]
    pub equip: Vec<LoadoutStep>,

    /// Return a module to inventory (repeatable, applied after --equip)
    #[arg(long = "unequip")]
    pub unequip: Vec<u32>,

    /// Show the detail panel for one module, by id or by name
    #[arg(long)]
    pub show: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn parse_bay(raw: &str) -> std::result::Result<BayConfig, String> {
    let (id, label) = match raw.split_once('=') {
        Some((id, label)) => (id.trim(), Some(label.trim().to_string())),
        None => (raw.trim(), None),
    };
    if id.is_empty() {
        return Err("bay id cannot be empty".to_string());
    }
    Ok(BayConfig {
        id: id.to_string(),
        label: label.filter(|l| !l.is_empty()),
    })
}

fn parse_equip(raw: &str) -> std::result::Result<LoadoutStep, String> {
    let (module, bay) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected MODULE=BAY, got '{}'", raw))?;
    let module = module
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid module id '{}': {}", module.trim(), e))?;
    let bay = bay.trim();
    if bay.is_empty() {
        return Err("bay id cannot be empty".to_string());
    }
    Ok(LoadoutStep {
        module,
        target: bay.to_string(),
    })
}

impl CliConfig {
    /// Folds the flags over the optional config file. Flags win for scalar
    /// settings; bays and loadout steps are appended after the file's.
    pub fn resolve(&self) -> Result<FitterConfig> {
        let mut config = match (&self.config, &self.source) {
            (Some(path), _) => FitterConfig::from_file(path)?,
            (None, Some(source)) => FitterConfig::with_source(source.clone()),
            (None, None) => {
                return Err(FitterError::MissingConfigError {
                    field: "catalog.source".to_string(),
                })
            }
        };

        if let Some(source) = &self.source {
            config.catalog.source = source.clone();
        }
        if let Some(modules) = &self.modules {
            config.catalog.modules = Some(modules.clone());
        }
        if let Some(stats) = &self.stats {
            config.catalog.stats = Some(stats.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.catalog.timeout_seconds = Some(timeout);
        }

        config.bays.extend(self.bays.iter().cloned());
        config.loadout.extend(self.equip.iter().cloned());
        config.loadout.extend(self.unequip.iter().map(|module| LoadoutStep {
            module: *module,
            target: crate::core::session::INVENTORY_CONTAINER.to_string(),
        }));

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CatalogConfig;

    #[test]
    fn test_parse_bay() {
        assert_eq!(
            parse_bay("weapon-bay=Main Gun").unwrap(),
            BayConfig {
                id: "weapon-bay".to_string(),
                label: Some("Main Gun".to_string())
            }
        );
        assert_eq!(parse_bay("shield-bay").unwrap().label, None);
        assert!(parse_bay("=x").is_err());
    }

    #[test]
    fn test_parse_equip() {
        let step = parse_equip("3=weapon-bay").unwrap();
        assert_eq!(step.module, 3);
        assert_eq!(step.target, "weapon-bay");
        assert!(parse_equip("weapon-bay").is_err());
        assert!(parse_equip("x=weapon-bay").is_err());
    }

    #[test]
    fn test_resolve_from_flags() {
        let cli = CliConfig::parse_from([
            "ship-fitter",
            "--source",
            "./catalog",
            "--stats",
            "ship-stats.json",
            "--bay",
            "weapon-bay=Weapon Bay",
            "--equip",
            "1=weapon-bay",
            "--unequip",
            "1",
            "--format",
            "json",
        ]);

        let config = cli.resolve().unwrap();

        assert_eq!(config.source(), "./catalog");
        assert_eq!(config.stats_resource(), "ship-stats.json");
        assert_eq!(config.modules_resource(), "modules.json");
        assert_eq!(config.bays.len(), 1);
        assert_eq!(config.loadout.len(), 2);
        assert_eq!(config.loadout[1].target, "inventory");
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_requires_source() {
        let cli = CliConfig::parse_from(["ship-fitter"]);
        assert!(matches!(
            cli.resolve(),
            Err(FitterError::MissingConfigError { .. })
        ));
    }
}
