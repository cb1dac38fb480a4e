use anyhow::Result;
use ship_fitter::app::report::{render_csv, render_text};
use ship_fitter::domain::ports::CatalogConfig;
use ship_fitter::utils::validation::Validate;
use ship_fitter::{CatalogLoader, CatalogSource, FitterConfig, ModuleId, Session, ShipReport};
use tempfile::TempDir;

async fn write_catalog(dir: &TempDir) -> Result<()> {
    let modules = serde_json::json!([
        {"id": 10, "name": "Ion Thruster", "tier": "Tier 1", "iconRef": "ion.png", "stats": {"speed": 30}},
        {"id": 11, "name": "Fusion Core", "tier": "Tier 3 Rare", "icon": "core.png", "stats": {"power": 15, "speed": -5}},
        {"id": 12, "name": "Cargo Pod", "tier": "Tier 1", "icon": "pod.png", "stats": {"capacity": 200}}
    ]);
    let stats = serde_json::json!([
        {"statName": "speed", "defaultValue": 10, "maxValue": 100},
        {"statName": "power", "defaultValue": 5, "maxValue": 0}
    ]);
    tokio::fs::write(dir.path().join("parts.json"), serde_json::to_vec(&modules)?).await?;
    tokio::fs::write(dir.path().join("ship.json"), serde_json::to_vec(&stats)?).await?;
    Ok(())
}

#[tokio::test]
async fn test_config_driven_loadout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_catalog(&temp_dir).await?;
    let catalog_dir = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let config_content = format!(
        r#"
[catalog]
source = "{}"
modules = "parts.json"
stats = "ship.json"

[[bays]]
id = "engine-bay"
label = "Engine Bay"

[[bays]]
id = "core-bay"
label = "Core Bay"

[[loadout]]
module = 10
target = "core-bay"

[[loadout]]
module = 10
target = "engine-bay"

[[loadout]]
module = 11
target = "core-bay"

[[loadout]]
module = 12
target = "inventory"

[[loadout]]
module = 99
target = "engine-bay"
"#,
        catalog_dir
    );
    let config_path = temp_dir.path().join("fitter.toml");
    tokio::fs::write(&config_path, config_content).await?;

    let config = FitterConfig::from_file(&config_path)?;
    config.validate()?;

    let source = CatalogSource::from_config(&config)?;
    let loader = CatalogLoader::new(source, config.modules_resource(), config.stats_resource());
    let mut session = Session::load(&loader, config.bays()).await;

    let changed: Vec<bool> = config
        .intents()
        .into_iter()
        .map(|intent| session.apply(intent).changed())
        .collect();
    assert_eq!(changed, vec![true, true, true, false, false]);

    let report = ShipReport::build(&session);
    assert_eq!(report.inventory.len(), 1);
    assert_eq!(report.inventory[0].id, ModuleId(12));
    assert_eq!(report.bays[0].occupant.as_ref().unwrap().id, ModuleId(10));
    assert_eq!(report.bays[1].occupant.as_ref().unwrap().id, ModuleId(11));

    // speed: 10 + 30 - 5; power has a zero ceiling and normalises to 0 %
    assert_eq!(report.stats[0].value, 35.0);
    assert_eq!(report.stats[0].percent, 35.0);
    assert_eq!(report.stats[1].value, 20.0);
    assert_eq!(report.stats[1].percent, 0.0);

    let text = render_text(&report);
    assert!(text.contains("Engine Bay"));
    assert!(text.contains("#11 Fusion Core"));

    let csv = render_csv(&report)?;
    assert!(csv.contains("speed,Speed,35,100,35.0"));
    Ok(())
}

#[tokio::test]
async fn test_missing_catalog_files_still_render_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = FitterConfig::from_toml_str(
        r#"
[catalog]
source = "./does-not-exist"

[[bays]]
id = "engine-bay"
"#,
    )?;
    config.catalog.source = temp_dir.path().join("missing").display().to_string();

    let source = CatalogSource::from_config(&config)?;
    let loader = CatalogLoader::new(source, config.modules_resource(), config.stats_resource());
    let session = Session::load(&loader, config.bays()).await;

    let report = ShipReport::build(&session);
    assert!(report.inventory.is_empty());
    assert!(report.stats.is_empty());
    assert_eq!(report.bays.len(), 1);
    assert!(report.bays[0].occupant.is_none());
    Ok(())
}
